//! Game state and log records
//!
//! Everything the presentation layer renders lives here. The engine is the
//! only writer; the adapter reads it through `GameEngine::state`.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::substance::Substance;
use crate::consts::MAX_SELECTION;

/// Category of a log record, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    #[default]
    Neutral,
    Success,
    Error,
}

impl LogKind {
    /// CSS class suffix for the log entry
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Neutral => "",
            LogKind::Success => "success",
            LogKind::Error => "error",
        }
    }
}

/// A single log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Step count of the attempt that produced this record (0 = before any attempt)
    pub step: u32,
    pub message: String,
    pub kind: LogKind,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.step, self.message)
    }
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Substances the player can pick from, in discovery order
    pub available: Vec<Substance>,
    /// Same members as `available`, for lookup
    pub discovered: BTreeSet<Substance>,
    /// Currently held substances (at most two)
    pub selection: Vec<Substance>,
    /// Combine attempts so far
    pub steps: u32,
    pub score: u32,
    /// Substance the player is trying to make
    pub target: Substance,
    /// Recent events (newest first)
    pub log: Vec<LogEntry>,
    log_capacity: usize,
}

impl GameState {
    /// Fresh session: starting set available, nothing selected, zero score/steps
    pub fn new(starting: &[Substance], target: Substance, log_capacity: usize) -> Self {
        let mut available = Vec::with_capacity(starting.len());
        for substance in starting {
            if !available.contains(substance) {
                available.push(substance.clone());
            }
        }
        let discovered = available.iter().cloned().collect();

        Self {
            available,
            discovered,
            selection: Vec::with_capacity(MAX_SELECTION),
            steps: 0,
            score: 0,
            target,
            log: Vec::with_capacity(log_capacity),
            log_capacity,
        }
    }

    pub fn is_available(&self, token: &str) -> bool {
        self.discovered.contains(token)
    }

    pub fn is_selected(&self, token: &str) -> bool {
        self.selection.iter().any(|s| s == token)
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// Add a newly produced substance. Returns false if it was already known.
    pub fn discover(&mut self, substance: Substance) -> bool {
        if !self.discovered.insert(substance.clone()) {
            return false;
        }
        self.available.push(substance);
        true
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Deduct points, never going below zero
    pub fn penalize(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Record an event at the current step, dropping the oldest past capacity
    pub fn push_log(&mut self, message: impl Into<String>, kind: LogKind) {
        self.log.insert(
            0,
            LogEntry {
                step: self.steps,
                message: message.into(),
                kind,
            },
        );
        self.log.truncate(self.log_capacity);
    }

    /// `discovered` and `available` hold the same members, without duplicates
    pub fn is_consistent(&self) -> bool {
        self.available.len() == self.discovered.len()
            && self.available.iter().all(|s| self.discovered.contains(s))
    }
}
