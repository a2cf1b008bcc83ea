//! Error types for the tfstate crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a state document
#[derive(Error, Debug)]
pub enum Error {
    /// State file could not be read
    #[error("failed to read state file {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON or does not match the expected layout
    #[error("invalid state document: {0}")]
    Json(#[from] serde_json::Error),

    /// State format version this crate does not understand
    #[error("unsupported state version: {0}")]
    UnsupportedVersion(u64),

    /// Resource key in a v3 state that is not `<type>.<name>[.<index>]`
    #[error("invalid resource key: {0}")]
    InvalidResourceKey(String),
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, Error>;
