//! Error types for inventory rendering.

use thiserror::Error;

/// Errors that can occur while writing an inventory.
#[derive(Debug, Error)]
pub enum Error {
    /// Value could not be encoded as JSON
    #[error("error encoding JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// Output stream rejected a write
    #[error("error writing inventory: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, Error>;
