mod commands;
mod render;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nyx_core::EventId;
use nyx_core::category::Category;
use nyx_core::config::SiteConfig;
use nyx_core::listing::{EventFilter, ViewMode};
use nyx_core::month::Month;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nyx")]
#[command(about = "Browse the Nyx Club events calendar and contact details")]
struct Cli {
    /// Config file to use instead of ~/.config/nyx/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read events from a JSON export instead of the CMS
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tagline and the next featured events
    Home,
    /// List events
    Events {
        /// Which events to show (all, upcoming, past)
        #[arg(long, default_value = "upcoming")]
        view: ViewMode,

        /// Only show this category (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<Category>,

        /// Only show events on this day (YYYY-MM-DD)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Full details of one event
    Event {
        /// CMS id of the event
        id: EventId,
    },
    /// Month grid with the month's events
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current one
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Contact details and social links
    Contact,
    /// List event categories
    Categories,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config =
        SiteConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let file = cli.file.as_deref();

    match cli.command {
        Commands::Home => commands::home::run(&config, file).await,
        Commands::Events {
            view,
            categories,
            on,
        } => {
            let filter = EventFilter {
                view,
                categories,
                day: on,
            };
            commands::events::run(&config, file, filter).await
        }
        Commands::Event { id } => commands::event::run(&config, file, id).await,
        Commands::Calendar { month } => commands::calendar::run(&config, file, month).await,
        Commands::Contact => commands::contact::run(&config).await,
        Commands::Categories => commands::categories::run(),
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
    }
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
