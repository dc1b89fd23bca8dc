//! Error types
//!
//! Only loading paths can fail. Everything on the event path is
//! fire-and-forget and logs instead of returning errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading assets, settings or scenarios
#[derive(Error, Debug)]
pub enum BounceError {
    /// File could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON document did not match the expected shape
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Velocity ceiling must be finite and strictly positive
    #[error("invalid initial max velocity {0}: must be finite and > 0")]
    InvalidCalibration(f32),

    /// Settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, BounceError>;
