use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use nyx_core::config::SiteConfig;
use nyx_core::constants::FEATURED_COUNT;
use nyx_core::day::calendar_day;
use nyx_core::listing::featured;
use owo_colors::OwoColorize;

use crate::render;
use crate::source::load_occurrences;

const TAGLINE: &str = "Una comunidad exclusiva dedicada a la educación, seguridad y conexiones significativas en un ambiente sofisticado.";

pub async fn run(config: &SiteConfig, file: Option<&Path>) -> Result<()> {
    let tz = config.timezone()?;
    let occurrences = load_occurrences(config, file).await?;

    let now = Utc::now();
    let next = featured(&occurrences, &now, &tz, FEATURED_COUNT);

    println!("{}", "NYX CLUB".bold());
    println!("{}", TAGLINE.dimmed());
    println!();
    println!("{}", "Próximos eventos".bold());

    if next.is_empty() {
        println!("{}", "  No hay eventos próximos".dimmed());
    } else {
        println!("{}", render::occurrence_list(&next, &tz, calendar_day(&now, &tz)));
    }

    println!();
    println!("{}", "nyx events  ·  nyx calendar  ·  nyx contact".dimmed());
    Ok(())
}
