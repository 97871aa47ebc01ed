//! Error types for preference persistence.

use thiserror::Error;

/// Errors that can occur while reading or writing preferences.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preference file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Preferences could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for preference operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for playsave_core::Error {
    fn from(e: Error) -> Self {
        playsave_core::Error::Preferences(e.to_string())
    }
}
