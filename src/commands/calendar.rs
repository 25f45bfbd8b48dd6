use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use nyx_core::config::SiteConfig;
use nyx_core::day::calendar_day;
use nyx_core::month::{Month, month_grid};
use nyx_core::EventOccurrence;
use owo_colors::OwoColorize;

use crate::render;
use crate::source::load_occurrences;

/// Print the month grid followed by that month's events.
pub async fn run(config: &SiteConfig, file: Option<&Path>, month: Option<Month>) -> Result<()> {
    let tz = config.timezone()?;
    let occurrences = load_occurrences(config, file).await?;

    let today = calendar_day(&Utc::now(), &tz);
    let month = month.unwrap_or_else(|| Month::containing(today));

    let grid = month_grid(month, &occurrences, &tz);
    println!("{}", render::month_grid(month, &grid, today));
    println!();

    let in_month: Vec<&EventOccurrence> = occurrences
        .iter()
        .filter(|o| Month::containing(o.calendar_day(&tz)) == month)
        .collect();

    if in_month.is_empty() {
        println!("{}", "No events this month".dimmed());
    } else {
        println!("{}", render::occurrence_list(&in_month, &tz, today));
    }

    println!();
    println!(
        "{}",
        format!("nyx calendar --month {}  ·  nyx calendar --month {}", month.previous(), month.next())
            .dimmed()
    );
    Ok(())
}
