//! Player intents
//!
//! The presentation layer turns clicks and key presses into one of these and
//! hands it to `GameEngine::handle`.

use serde::{Deserialize, Serialize};

use super::engine::CombineEvent;
use super::substance::Substance;

/// A discrete request from the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Toggle a substance in or out of the selection
    Select(Substance),
    /// React the two selected substances
    Combine,
    /// Drop the current selection (Escape)
    ClearSelection,
    /// Start over with a new target
    Reset,
}

/// What the adapter needs to re-render after an intent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IntentResponse {
    /// Selection length after the intent (combine button enabled at 2)
    pub selection_len: usize,
    /// Set only when a combine attempt actually happened
    pub event: Option<CombineEvent>,
}
