//! Error types for playsave-core
//!
//! Capture and restore never fail; these errors come from typed conversions,
//! configuration loading and preference persistence.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Preference store error: {0}")]
    Preferences(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
