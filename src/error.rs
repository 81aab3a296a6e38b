// src/error.rs
// Error taxonomy for the coaching layer. Every failure kind is surfaced to
// the caller; nothing here recovers silently or substitutes a default.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoachError>;

#[derive(Debug, Error)]
pub enum CoachError {
    /// Missing or unusable configuration. Fatal at startup, no retry.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The backing document could not be read or written.
    #[error("Profile I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document exists but is not a valid profile. Never
    /// auto-repaired: overwriting with defaults would destroy user data.
    #[error("Corrupt profile data: {0}")]
    CorruptData(String),

    /// The generation service call failed: network, auth, quota, or a
    /// malformed or empty response.
    #[error("Generation error: {0}")]
    Generation(String),
}

impl From<reqwest::Error> for CoachError {
    fn from(err: reqwest::Error) -> Self {
        CoachError::Generation(err.to_string())
    }
}
