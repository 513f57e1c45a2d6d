//! Error types
//!
//! Every error here is a configuration problem detected before a session
//! starts. Simulation invariant violations panic instead.

use thiserror::Error;

/// Errors surfaced while building a game
#[derive(Error, Debug)]
pub enum DuetError {
    /// Mode string did not name any known mode
    #[error("invalid game mode '{0}' (expected man, contr or ai)")]
    UnknownMode(String),

    /// Mode exists but has no implementation
    #[error("game mode '{0}' is not implemented")]
    UnsupportedMode(&'static str),

    /// Configuration values are inconsistent
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}
