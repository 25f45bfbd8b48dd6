//! HTTP client for the club's content API.

use std::time::Duration;

use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::cms::{ParsedEvents, parse_events};
use crate::config::SiteConfig;
use crate::contact::{ContactInfo, parse_contact};
use crate::error::NyxResult;
use crate::event::RawEvent;

const EVENTS_PATH: &str = "/api/events?populate=*";
const CONTACT_PATH: &str = "/api/contact-infos?populate=*";
const USER_AGENT: &str = concat!("nyx-core/", env!("CARGO_PKG_VERSION"));

pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    tz: Tz,
}

impl CmsClient {
    pub fn new(config: &SiteConfig) -> NyxResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(CmsClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tz: config.timezone()?,
        })
    }

    async fn get_text(&self, path: &str) -> NyxResult<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching from CMS");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Fetch and parse the events document, surfacing every failure.
    pub async fn try_fetch_events(&self) -> NyxResult<ParsedEvents> {
        let body = self.get_text(EVENTS_PATH).await?;
        Ok(parse_events(&body, &self.tz)?)
    }

    /// Fetch events for display. Any failure means "no events": it is logged
    /// and an empty list is returned. Unreadable records are logged and skipped.
    pub async fn fetch_events(&self) -> Vec<RawEvent> {
        match self.try_fetch_events().await {
            Ok(parsed) => {
                for error in &parsed.errors {
                    warn!(record = error.index, id = ?error.id, "skipping CMS event: {}", error.message);
                }
                parsed.events
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch events, showing none");
                Vec::new()
            }
        }
    }

    /// Fetch the first contact-info record, if any.
    pub async fn fetch_contact(&self) -> NyxResult<Option<ContactInfo>> {
        let body = self.get_text(CONTACT_PATH).await?;
        Ok(parse_contact(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NyxError;

    fn unreachable_config() -> SiteConfig {
        // Port 9 (discard) is not expected to be listening locally
        SiteConfig {
            api_base_url: "http://127.0.0.1:9/".to_string(),
            request_timeout_secs: 2,
            ..SiteConfig::default()
        }
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = CmsClient::new(&unreachable_config()).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let config = SiteConfig {
            timezone: "Nowhere/Special".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(CmsClient::new(&config), Err(NyxError::Config(_))));
    }

    #[tokio::test]
    async fn fetch_failure_yields_no_events() {
        let client = CmsClient::new(&unreachable_config()).unwrap();

        assert!(client.fetch_events().await.is_empty());
        assert!(matches!(client.try_fetch_events().await, Err(NyxError::Http(_))));
    }
}
