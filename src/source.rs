//! Where the CLI reads events from: a local JSON export or the CMS.

use std::path::Path;

use anyhow::{Context, Result};
use nyx_core::client::CmsClient;
use nyx_core::cms::parse_events;
use nyx_core::config::SiteConfig;
use nyx_core::recurrence::expand;
use nyx_core::{EventOccurrence, RawEvent};
use tracing::{debug, warn};

pub async fn load_events(config: &SiteConfig, file: Option<&Path>) -> Result<Vec<RawEvent>> {
    let Some(path) = file else {
        return Ok(CmsClient::new(config)?.fetch_events().await);
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed = parse_events(&content, &config.timezone()?)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    for error in &parsed.errors {
        warn!(record = error.index, id = ?error.id, "skipping event: {}", error.message);
    }
    debug!(count = parsed.events.len(), path = %path.display(), "loaded events from file");

    Ok(parsed.events)
}

/// Load and expand events into display occurrences.
pub async fn load_occurrences(
    config: &SiteConfig,
    file: Option<&Path>,
) -> Result<Vec<EventOccurrence>> {
    let events = load_events(config, file).await?;
    Ok(expand(&events, &config.expand_options()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("nyx-source-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn file_events_are_expanded() {
        let path = write_temp(
            "weekly",
            r#"{"data": [
                {"id": 1, "title": "Taller", "date": "2025-01-06T19:00:00",
                 "recurrenceType": "weekly", "recurrenceEndDate": "2025-01-27"},
                {"title": "Sin id", "date": "2025-01-08"}
            ]}"#,
        );

        let config = SiteConfig::default();
        let occurrences = load_occurrences(&config, Some(&path)).await.unwrap();

        // The record without an id is skipped
        assert_eq!(occurrences.len(), 4);
        assert!(occurrences.iter().all(|o| o.original_event_id == 1));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("nyx-source-does-not-exist.json");
        let err = load_events(&SiteConfig::default(), Some(&path)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
