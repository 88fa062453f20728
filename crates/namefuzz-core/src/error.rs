//! Error types for namefuzz boundaries.
//!
//! The matching algorithms themselves never fail; these errors come from
//! parsing requests, validating options and installing a log subscriber.

use thiserror::Error;

/// Errors raised at the library boundary.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Malformed JSON input or a failed serialization
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Options that cannot be applied
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Log subscriber could not be installed
    #[error("logging error: {0}")]
    Logging(String),
}

/// Result type alias using [`MatchError`].
pub type Result<T> = std::result::Result<T, MatchError>;
