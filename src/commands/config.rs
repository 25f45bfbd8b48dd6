use std::path::Path;

use anyhow::Result;
use nyx_core::config::SiteConfig;
use owo_colors::OwoColorize;

/// Print the effective configuration after every layer is applied.
pub fn run(config: &SiteConfig, path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => SiteConfig::config_path()?,
    };

    let status = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("{}", format!("# {}{}", path.display(), status).dimmed());
    print!("{}", config.to_toml()?);
    Ok(())
}
