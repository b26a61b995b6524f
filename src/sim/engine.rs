//! Game engine
//!
//! Owns the session state and applies player intents to it. Every call runs to
//! completion: the engine never waits on the player, it reports what happened
//! and leaves follow-ups (like offering a new target after a win) to the caller.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::intent::{Intent, IntentResponse};
use super::reaction::resolve;
use super::state::{GameState, LogKind};
use super::substance::Substance;
use crate::config::GameConfig;
use crate::consts::MAX_SELECTION;
use crate::error::ConfigError;

/// Result of a combine attempt that actually ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CombineEvent {
    Reacted {
        reactants: [Substance; 2],
        product: Substance,
        /// First time this product was made this session
        is_new: bool,
        /// Product is the current target
        won: bool,
        /// Product contains the target token without being it
        near_target: bool,
        /// Total points gained by this attempt
        points: u32,
    },
    NoReaction {
        reactants: [Substance; 2],
        /// Points actually deducted (less than the full penalty near zero)
        penalty: u32,
    },
}

impl CombineEvent {
    pub fn won(&self) -> bool {
        matches!(self, CombineEvent::Reacted { won: true, .. })
    }

    pub fn product(&self) -> Option<&Substance> {
        match self {
            CombineEvent::Reacted { product, .. } => Some(product),
            CombineEvent::NoReaction { .. } => None,
        }
    }

    pub fn reactants(&self) -> &[Substance; 2] {
        match self {
            CombineEvent::Reacted { reactants, .. } | CombineEvent::NoReaction { reactants, .. } => {
                reactants
            }
        }
    }
}

/// A play session: configuration, live state and the target RNG
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: Pcg32,
}

impl GameEngine {
    /// Validate `config` and start a session with a target drawn from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = fresh_state(&config, &mut rng, "Game started! Make");
        log::info!("Session started (seed {}), target {}", seed, state.target);

        Ok(Self { config, state, rng })
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True when exactly two substances are held
    pub fn can_combine(&self) -> bool {
        self.state.selection.len() == MAX_SELECTION
    }

    /// Toggle `token` in the selection. Returns the new selection length.
    ///
    /// Unknown tokens and a third pick while two are held are ignored.
    pub fn select_substance(&mut self, token: &str) -> usize {
        let state = &mut self.state;
        if !state.is_available(token) {
            log::debug!("Ignoring selection of unavailable substance {}", token);
            return state.selection.len();
        }

        if let Some(index) = state.selection.iter().position(|s| s == token) {
            state.selection.remove(index);
        } else if state.selection.len() < MAX_SELECTION {
            state.selection.push(Substance::from(token));
        }

        log::debug!("Selection: {:?}", state.selection);
        state.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// React the two selected substances.
    ///
    /// Returns `None` (and changes nothing) unless exactly two are selected.
    pub fn combine(&mut self) -> Option<CombineEvent> {
        if !self.can_combine() {
            return None;
        }

        self.state.steps += 1;
        let reactants = [
            self.state.selection[0].clone(),
            self.state.selection[1].clone(),
        ];
        self.state.selection.clear();

        let scoring = self.config.scoring;
        let score_before = self.state.score;
        let [a, b] = &reactants;

        let Some(product) = resolve(a, b, &self.config.reactions) else {
            self.state.penalize(scoring.failure_penalty);
            self.state
                .push_log(format!("{} + {} → no reaction", a, b), LogKind::Error);
            log::debug!("Step {}: {} + {} did not react", self.state.steps, a, b);

            return Some(CombineEvent::NoReaction {
                penalty: score_before - self.state.score,
                reactants,
            });
        };

        let is_new = self.state.discover(product.clone());
        if is_new {
            self.state.award(scoring.discovery);
            log::info!("Discovered {}", product);
        } else {
            self.state.award(scoring.repeat);
        }

        let won = product == self.state.target;
        let near_target = !won && product.contains(&self.state.target);
        if won {
            self.state.award(scoring.target);
            self.state
                .push_log(format!("Victory! You made {}!", product), LogKind::Success);
            log::info!("Target {} reached in {} steps", product, self.state.steps);
        } else if near_target {
            self.state.push_log(
                format!("Close! {} contains the target {}", product, self.state.target),
                LogKind::Success,
            );
            self.state.award(scoring.near_target);
        }

        let tag = if is_new { " (NEW!)" } else { "" };
        self.state
            .push_log(format!("{} + {} → {}{}", a, b, product, tag), LogKind::Neutral);

        Some(CombineEvent::Reacted {
            points: self.state.score - score_before,
            reactants,
            product,
            is_new,
            won,
            near_target,
        })
    }

    /// Throw the session away and start over with a freshly drawn target
    pub fn reset_game(&mut self) {
        self.state = fresh_state(&self.config, &mut self.rng, "New game! Target");
        log::info!("Game reset, target {}", self.state.target);
    }

    /// Apply a player intent
    pub fn handle(&mut self, intent: Intent) -> IntentResponse {
        let event = match intent {
            Intent::Select(substance) => {
                self.select_substance(substance.as_str());
                None
            }
            Intent::Combine => self.combine(),
            Intent::ClearSelection => {
                self.clear_selection();
                None
            }
            Intent::Reset => {
                self.reset_game();
                None
            }
        };

        IntentResponse {
            selection_len: self.state.selection.len(),
            event,
        }
    }
}

/// New state with a uniformly drawn target and one announcement in the log
fn fresh_state(config: &GameConfig, rng: &mut Pcg32, announcement: &str) -> GameState {
    // validate() guarantees a non-empty pool
    let target = config.targets[rng.random_range(0..config.targets.len())].clone();
    let mut state = GameState::new(&config.starting, target, config.log_capacity);
    state.push_log(format!("{}: {}", announcement, state.target), LogKind::Neutral);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ReactionTable;

    fn lab(starting: &[&str], reactions: &[(&str, &str, &str)], targets: &[&str]) -> GameEngine {
        let config = GameConfig {
            starting: starting.iter().copied().map(Substance::from).collect(),
            reactions: ReactionTable::from_triples(reactions.iter().copied()),
            targets: targets.iter().copied().map(Substance::from).collect(),
            ..Default::default()
        };
        GameEngine::new(config, 12345).unwrap()
    }

    fn water_lab(target: &str) -> GameEngine {
        lab(&["H₂", "O₂", "C", "Fe"], &[("H₂", "O₂", "H₂O")], &[target])
    }

    #[test]
    fn test_new_session() {
        let engine = water_lab("H₂O");
        let state = engine.state();
        assert_eq!(state.target, "H₂O");
        assert_eq!(state.steps, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.log.len(), 1);
        assert_eq!(state.log[0].step, 0);
        assert_eq!(state.log[0].message, "Game started! Make: H₂O");
        assert!(!engine.can_combine());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            targets: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            GameEngine::new(config, 1),
            Err(ConfigError::NoTargets)
        ));
    }

    #[test]
    fn test_select_toggle_and_limit() {
        let mut engine = water_lab("H₂O");
        assert_eq!(engine.select_substance("H₂"), 1);
        assert_eq!(engine.select_substance("O₂"), 2);
        assert!(engine.can_combine());

        // Third pick while two are held is ignored
        assert_eq!(engine.select_substance("C"), 2);
        assert!(!engine.state().is_selected("C"));

        // Re-selecting deselects
        assert_eq!(engine.select_substance("H₂"), 1);
        assert!(!engine.state().is_selected("H₂"));
        assert_eq!(engine.state().selection, vec![Substance::from("O₂")]);
    }

    #[test]
    fn test_select_unavailable_is_ignored() {
        let mut engine = water_lab("H₂O");
        assert_eq!(engine.select_substance("H₂O"), 0);
        assert_eq!(engine.select_substance("Xe"), 0);
        assert!(engine.state().selection.is_empty());
    }

    #[test]
    fn test_clear_selection_twice() {
        let mut engine = water_lab("H₂O");
        engine.select_substance("H₂");
        engine.select_substance("C");
        engine.clear_selection();
        assert!(engine.state().selection.is_empty());
        engine.clear_selection();
        assert!(engine.state().selection.is_empty());
    }

    #[test]
    fn test_scenario_a_discovery_and_win() {
        let mut engine = lab(&["H₂", "O₂"], &[("H₂", "O₂", "H₂O")], &["H₂O"]);
        engine.select_substance("H₂");
        engine.select_substance("O₂");
        let event = engine.combine().unwrap();

        assert!(event.won());
        assert_eq!(event.product(), Some(&Substance::from("H₂O")));
        assert!(matches!(
            event,
            CombineEvent::Reacted { is_new: true, near_target: false, points: 550, .. }
        ));

        let state = engine.state();
        assert_eq!(state.score, 550);
        assert_eq!(state.steps, 1);
        assert!(state.is_available("H₂O"));
        assert!(state.selection.is_empty());
        assert!(state.is_consistent());

        // Combination record on top, victory just below, both for step 1
        assert_eq!(state.log[0].message, "H₂ + O₂ → H₂O (NEW!)");
        assert_eq!(state.log[0].kind, LogKind::Neutral);
        assert_eq!(state.log[1].kind, LogKind::Success);
        assert_eq!(state.log[0].step, 1);
        assert_eq!(state.log[1].step, 1);

        // The engine does not reset on its own
        assert_eq!(state.target, "H₂O");
        assert_eq!(state.available.len(), 3);
    }

    #[test]
    fn test_scenario_b_single_substance_cannot_combine() {
        let mut engine = lab(&["H₂"], &[("H₂", "O₂", "H₂O")], &["H₂O"]);
        engine.select_substance("H₂");
        assert_eq!(engine.select_substance("H₂"), 0);
        engine.select_substance("H₂");
        assert_eq!(engine.combine(), None);
        assert_eq!(engine.state().steps, 0);
        assert_eq!(engine.state().log.len(), 1);
    }

    #[test]
    fn test_scenario_c_no_reaction() {
        let mut engine = water_lab("NaCl");
        engine.select_substance("C");
        engine.select_substance("Fe");
        let event = engine.combine().unwrap();

        assert_eq!(
            event,
            CombineEvent::NoReaction {
                reactants: [Substance::from("C"), Substance::from("Fe")],
                penalty: 0,
            }
        );
        let state = engine.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 1);
        assert_eq!(state.available.len(), 4);
        assert_eq!(state.log[0].kind, LogKind::Error);
        assert_eq!(state.log[0].message, "C + Fe → no reaction");
        assert_eq!(state.log[0].step, 1);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_failure_penalty_after_points() {
        let mut engine = water_lab("NaCl");
        engine.select_substance("H₂");
        engine.select_substance("O₂");
        engine.combine();
        assert_eq!(engine.state().score, 50);

        engine.select_substance("C");
        engine.select_substance("Fe");
        let event = engine.combine().unwrap();
        assert!(matches!(event, CombineEvent::NoReaction { penalty: 5, .. }));
        assert_eq!(engine.state().score, 45);
        assert_eq!(engine.state().steps, 2);
    }

    #[test]
    fn test_scenario_d_repeat_reaction() {
        let mut engine = water_lab("NaCl");
        for _ in 0..2 {
            engine.select_substance("O₂");
            engine.select_substance("H₂");
            engine.combine();
        }
        let state = engine.state();
        assert_eq!(state.score, 60);
        assert_eq!(state.available.len(), 5);
        assert_eq!(state.available.iter().filter(|s| *s == "H₂O").count(), 1);
        assert_eq!(state.log[0].message, "O₂ + H₂ → H₂O");
    }

    #[test]
    fn test_repeat_reaction_event() {
        let mut engine = water_lab("NaCl");
        engine.select_substance("H₂");
        engine.select_substance("O₂");
        engine.combine();
        engine.select_substance("H₂");
        engine.select_substance("O₂");
        let event = engine.combine().unwrap();
        assert!(matches!(
            event,
            CombineEvent::Reacted { is_new: false, won: false, points: 10, .. }
        ));
    }

    #[test]
    fn test_near_target_bonus() {
        let mut engine = lab(&["H₂O", "O₂"], &[("H₂O", "O₂", "H₂O₂")], &["H₂O"]);
        engine.select_substance("H₂O");
        engine.select_substance("O₂");
        let event = engine.combine().unwrap();

        assert!(!event.won());
        assert!(matches!(
            event,
            CombineEvent::Reacted { is_new: true, near_target: true, points: 150, .. }
        ));
        let state = engine.state();
        assert_eq!(state.score, 150);
        assert_eq!(state.log[1].kind, LogKind::Success);
        assert_eq!(state.log[1].message, "Close! H₂O₂ contains the target H₂O");
    }

    #[test]
    fn test_scenario_e_reset() {
        let mut engine = lab(
            &["H₂", "O₂", "C", "Fe"],
            &[("H₂", "O₂", "H₂O")],
            &["H₂O", "CO₂", "NaCl"],
        );
        engine.select_substance("H₂");
        engine.select_substance("O₂");
        engine.combine();
        engine.select_substance("C");
        engine.combine();

        engine.reset_game();
        let state = engine.state();
        assert_eq!(state.steps, 0);
        assert_eq!(state.score, 0);
        assert!(state.selection.is_empty());
        assert_eq!(state.available, engine.config().starting);
        assert!(state.is_consistent());
        assert!(engine.config().targets.contains(&state.target));
        assert_eq!(state.log.len(), 1);
        assert_eq!(state.log[0].message, format!("New game! Target: {}", state.target));
        assert_eq!(state.log[0].step, 0);
    }

    #[test]
    fn test_reset_draws_every_target_eventually() {
        let mut engine = GameEngine::new(GameConfig::default(), 7).unwrap();
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            engine.reset_game();
            seen.insert(engine.state().target.clone());
        }
        assert_eq!(seen.len(), engine.config().targets.len());
    }

    #[test]
    fn test_same_seed_same_targets() {
        let mut a = GameEngine::new(GameConfig::default(), 99999).unwrap();
        let mut b = GameEngine::new(GameConfig::default(), 99999).unwrap();
        for _ in 0..20 {
            assert_eq!(a.state().target, b.state().target);
            a.reset_game();
            b.reset_game();
        }
    }

    #[test]
    fn test_log_keeps_ten_newest() {
        let mut engine = water_lab("NaCl");
        // Session start + 10 failed attempts = 11 events
        for _ in 0..10 {
            engine.select_substance("C");
            engine.select_substance("Fe");
            engine.combine();
        }
        let log = &engine.state().log;
        assert_eq!(log.len(), 10);
        let steps: Vec<u32> = log.iter().map(|e| e.step).collect();
        assert_eq!(steps, (1..=10).rev().collect::<Vec<_>>());
        assert!(log.iter().all(|e| e.kind == LogKind::Error));
    }

    #[test]
    fn test_handle_dispatch() {
        let mut engine = water_lab("H₂O");
        let response = engine.handle(Intent::Select(Substance::from("H₂")));
        assert_eq!(response, IntentResponse { selection_len: 1, event: None });

        engine.handle(Intent::Select(Substance::from("O₂")));
        let response = engine.handle(Intent::Combine);
        assert_eq!(response.selection_len, 0);
        assert!(response.event.as_ref().is_some_and(CombineEvent::won));

        // Combine with nothing selected reports no event
        assert_eq!(engine.handle(Intent::Combine).event, None);

        engine.handle(Intent::Select(Substance::from("C")));
        assert_eq!(engine.handle(Intent::ClearSelection).selection_len, 0);

        engine.handle(Intent::Reset);
        assert_eq!(engine.state().steps, 0);
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn test_event_json_shape() {
        let mut engine = water_lab("NaCl");
        engine.select_substance("C");
        engine.select_substance("Fe");
        let event = engine.combine().unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["outcome"], "no_reaction");
        assert_eq!(json["reactants"][1], "Fe");
        assert_eq!(event.reactants()[0], "C");
    }
}
