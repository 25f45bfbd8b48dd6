use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;
use nyx_core::EventId;
use nyx_core::config::SiteConfig;
use nyx_core::day::{calendar_day, upcoming};
use nyx_core::listing::find_event;
use nyx_core::recurrence::expand;
use owo_colors::OwoColorize;

use crate::render;
use crate::source::load_events;

/// Dates listed under the detail view of a recurring event.
const NEXT_DATES: usize = 5;

pub async fn run(config: &SiteConfig, file: Option<&Path>, id: EventId) -> Result<()> {
    let tz = config.timezone()?;
    let events = load_events(config, file).await?;

    let Some(event) = find_event(&events, id) else {
        bail!("No event with id {}", id);
    };

    println!("{}", render::event_details(event, &tz));

    if event.is_weekly() {
        let now = Utc::now();
        let occurrences = expand(std::slice::from_ref(event), &config.expand_options()?);
        let next: Vec<_> = upcoming(&occurrences, &now, &tz)
            .into_iter()
            .take(NEXT_DATES)
            .collect();

        println!();
        if next.is_empty() {
            println!("{}", "No upcoming dates".dimmed());
        } else {
            println!("{}", "Next dates".bold());
            println!("{}", render::occurrence_list(&next, &tz, calendar_day(&now, &tz)));
        }
    }

    Ok(())
}
