//! Error types for game configuration.
//!
//! Gameplay itself has no failure modes: bad intents are no-ops and a missing
//! reaction is an ordinary outcome. Only externally supplied data can be wrong.

use thiserror::Error;

/// Problems found while loading or validating a [`crate::GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config document is not valid JSON for the expected shape
    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Starting substance set is empty")]
    NoStartingSubstances,

    /// Starting substances must be unique
    #[error("Starting substance '{0}' listed more than once")]
    DuplicateStartingSubstance(String),

    #[error("Target pool is empty")]
    NoTargets,

    /// A substance token in the given section is the empty string
    #[error("Empty substance token in {0}")]
    EmptyToken(&'static str),

    #[error("Log capacity must be at least 1")]
    ZeroLogCapacity,
}
