//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Reaction rules are static data
//! - Seeded RNG only (target draws)
//! - One owner mutates the state; renderers only read it

pub mod engine;
pub mod intent;
pub mod reaction;
pub mod state;
pub mod substance;

pub use engine::{CombineEvent, GameEngine};
pub use intent::{Intent, IntentResponse};
pub use reaction::{Reaction, ReactionTable, resolve};
pub use state::{GameState, LogEntry, LogKind};
pub use substance::Substance;
