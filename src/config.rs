//! Game configuration
//!
//! The reaction table, starting set and target pool are plain data. A default
//! lab ships with the crate; a JSON document can replace any part of it.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Intent, ReactionTable, Substance};

/// Points awarded or deducted per combine outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    /// Product was not available before
    pub discovery: u32,
    /// Product was already available
    pub repeat: u32,
    /// Product is the target
    pub target: u32,
    /// Product contains the target token
    pub near_target: u32,
    /// No reaction for the pair
    pub failure_penalty: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            discovery: DISCOVERY_BONUS,
            repeat: REPEAT_BONUS,
            target: TARGET_BONUS,
            near_target: NEAR_TARGET_BONUS,
            failure_penalty: FAILED_REACTION_PENALTY,
        }
    }
}

/// Keyboard shortcuts (adapter-level, `KeyboardEvent.code` names)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub combine: String,
    pub clear_selection: String,
    pub reset: String,
    /// Reset only fires with Ctrl held
    pub reset_requires_ctrl: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            combine: "Space".to_string(),
            clear_selection: "Escape".to_string(),
            reset: "KeyN".to_string(),
            reset_requires_ctrl: true,
        }
    }
}

impl Controls {
    /// Map a key press to an intent, if it is bound
    pub fn intent_for_key(&self, code: &str, ctrl: bool) -> Option<Intent> {
        if code == self.combine {
            Some(Intent::Combine)
        } else if code == self.clear_selection {
            Some(Intent::ClearSelection)
        } else if code == self.reset && (ctrl || !self.reset_requires_ctrl) {
            Some(Intent::Reset)
        } else {
            None
        }
    }
}

/// Everything an engine needs to run a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Substances available at the start of every session
    pub starting: Vec<Substance>,
    pub reactions: ReactionTable,
    /// Candidate targets, drawn uniformly with replacement
    pub targets: Vec<Substance>,
    pub scoring: Scoring,
    pub controls: Controls,
    /// Log records kept for display
    pub log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting: tokens(&["H₂", "O₂", "C", "Fe", "Na", "Cl"]),
            reactions: default_reactions(),
            targets: tokens(&[
                "H₂O", "CO₂", "NaCl", "HCl", "NaOH", "CH₄", "Fe₂O₃", "FeCl₃", "H₂CO₃", "Na₂CO₃",
            ]),
            scoring: Scoring::default(),
            controls: Controls::default(),
            log_capacity: LOG_CAPACITY,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the data an engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting.is_empty() {
            return Err(ConfigError::NoStartingSubstances);
        }
        if self.starting.iter().any(Substance::is_empty) {
            return Err(ConfigError::EmptyToken("starting substances"));
        }
        for (i, substance) in self.starting.iter().enumerate() {
            if self.starting[..i].contains(substance) {
                return Err(ConfigError::DuplicateStartingSubstance(
                    substance.as_str().to_string(),
                ));
            }
        }

        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if self.targets.iter().any(Substance::is_empty) {
            return Err(ConfigError::EmptyToken("targets"));
        }

        let empty_in_reaction = self.reactions.iter().any(|r| {
            r.product.is_empty() || r.inputs.iter().any(Substance::is_empty)
        });
        if empty_in_reaction {
            return Err(ConfigError::EmptyToken("reactions"));
        }

        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        Ok(())
    }
}

fn tokens(list: &[&str]) -> Vec<Substance> {
    list.iter().copied().map(Substance::from).collect()
}

/// The stock lab bench
fn default_reactions() -> ReactionTable {
    ReactionTable::from_triples([
        ("H₂", "O₂", "H₂O"),
        ("H₂O", "O₂", "H₂O₂"),
        ("C", "O₂", "CO₂"),
        ("C", "H₂", "CH₄"),
        ("CH₄", "O₂", "CO₂"),
        ("Na", "Cl", "NaCl"),
        ("H₂", "Cl", "HCl"),
        ("Fe", "O₂", "Fe₂O₃"),
        ("Fe", "Cl", "FeCl₃"),
        ("Fe", "HCl", "FeCl₂"),
        ("Na", "H₂O", "NaOH"),
        ("CO₂", "H₂O", "H₂CO₃"),
        ("NaOH", "HCl", "NaCl"),
        ("NaOH", "CO₂", "Na₂CO₃"),
        ("Na₂CO₃", "HCl", "NaCl"),
        ("Fe₂O₃", "C", "Fe"),
        ("FeCl₂", "Cl", "FeCl₃"),
    ])
}
