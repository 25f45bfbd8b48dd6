use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use nyx_core::config::SiteConfig;
use nyx_core::day::calendar_day;
use nyx_core::listing::EventFilter;
use owo_colors::OwoColorize;

use crate::render;
use crate::source::load_occurrences;

pub async fn run(config: &SiteConfig, file: Option<&Path>, filter: EventFilter) -> Result<()> {
    let tz = config.timezone()?;
    let occurrences = load_occurrences(config, file).await?;

    let now = Utc::now();
    let selected = filter.apply(&occurrences, &now, &tz);

    if selected.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    println!("{}", render::occurrence_list(&selected, &tz, calendar_day(&now, &tz)));
    Ok(())
}
