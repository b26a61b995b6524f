//! Chem Lab - A chemistry combination puzzle
//!
//! Core modules:
//! - `sim`: Game state, reaction table and the engine that drives a session
//! - `config`: Data-driven starting set, reactions, targets, scoring and key bindings
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::{Controls, GameConfig, Scoring};
pub use error::ConfigError;
pub use sim::{CombineEvent, GameEngine, GameState, Intent, ReactionTable, Substance, resolve};

/// Game configuration constants
pub mod consts {
    /// Substances a player can hold at once
    pub const MAX_SELECTION: usize = 2;
    /// Log entries kept for display (newest first)
    pub const LOG_CAPACITY: usize = 10;

    /// Scoring defaults
    pub const DISCOVERY_BONUS: u32 = 50;
    pub const REPEAT_BONUS: u32 = 10;
    pub const TARGET_BONUS: u32 = 500;
    /// Product contains the target token but isn't it
    pub const NEAR_TARGET_BONUS: u32 = 100;
    pub const FAILED_REACTION_PENALTY: u32 = 5;

    /// Delay before the adapter asks whether to start over after a win (ms)
    pub const WIN_PROMPT_DELAY_MS: i32 = 300;
}
