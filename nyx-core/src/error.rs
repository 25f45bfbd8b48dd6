//! Error types for the Nyx events crate.

use thiserror::Error;

/// Errors that can occur while loading configuration or talking to the CMS.
#[derive(Error, Debug)]
pub enum NyxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A CMS document that could not be read at all.
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized document shape: {0}")]
    UnknownShape(String),
}

/// A single record that was skipped while the rest of the document was read.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("record #{index}: {message}")]
pub struct RecordError {
    /// Position of the record in the document's list
    pub index: usize,
    /// The record's id, when it had a readable one
    pub id: Option<i64>,
    pub message: String,
}

/// Result type alias for Nyx operations.
pub type NyxResult<T> = Result<T, NyxError>;

/// Result type alias for CMS document parsing.
pub type CmsResult<T> = Result<T, CmsError>;
