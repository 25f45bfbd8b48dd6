//! Core types for the Nyx Club events site.
//!
//! This crate holds everything the pages need beyond presentation:
//! - `event` types for CMS records and their concrete occurrences
//! - `recurrence` expansion of weekly events into occurrences
//! - `day` calendar-day comparisons in the club's reference timezone
//! - `cms` normalization of the content API's response shapes
//! - `client` for fetching events and contact details

pub mod category;
pub mod client;
pub mod cms;
pub mod config;
pub mod constants;
pub mod contact;
pub mod day;
pub mod error;
pub mod event;
pub mod listing;
pub mod month;
pub mod recurrence;

// Re-export the event types at crate root for convenience
pub use event::*;
