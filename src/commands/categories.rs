use anyhow::Result;
use nyx_core::category::Category;

use crate::render::Render;

pub fn run() -> Result<()> {
    for category in Category::ALL {
        println!("{}", category.render());
    }
    Ok(())
}
