use anyhow::Result;
use nyx_core::client::CmsClient;
use nyx_core::config::SiteConfig;
use owo_colors::OwoColorize;
use tracing::warn;

use crate::render::Render;

/// Contact details from the CMS, falling back to the configured ones.
pub async fn run(config: &SiteConfig) -> Result<()> {
    let client = CmsClient::new(config)?;

    let contact = match client.fetch_contact().await {
        Ok(Some(contact)) => contact,
        Ok(None) => {
            warn!("CMS has no contact record, using configured details");
            config.contact.clone()
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch contact details, using configured ones");
            config.contact.clone()
        }
    };

    println!("{}", "Contacto".bold());
    println!("{}", contact.render());
    println!("{} {}", "Mapa".dimmed(), config.map_url);
    println!();
    println!("{}", config.social.render());
    Ok(())
}
