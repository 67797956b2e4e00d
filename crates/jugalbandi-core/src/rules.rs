//! Game rules: roles, scoring, sequence length and session configuration.
//!
//! Everything here is a pure function of its inputs so the rules can be
//! tested without a running game.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Note, Seat};

/// Shortest allowed sequence.
pub const MIN_SEQUENCE_LENGTH: usize = 3;

/// Longest allowed sequence.
pub const MAX_SEQUENCE_LENGTH: usize = 50;

/// Lives granted on every guess-phase entry.
pub const MAX_LIVES: u8 = 3;

/// Delay between a resolved guess and the start of the next round.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(2000);

/// How a guess phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Guesser reproduced the whole sequence.
    GuesserWon,
    /// Guesser ran out of lives.
    CreatorWon,
}

/// Points formula applied at the end of each round.
///
/// A session uses exactly one rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringRule {
    /// `required_length * 100` to whoever wins the round.
    #[default]
    FlatLength,
    /// `round * 100` to a successful guesser, `round * 50` to the creator
    /// when the guesser fails.
    RoundScaled,
}

impl ScoringRule {
    /// Points awarded to the round winner.
    pub fn points(self, outcome: Outcome, round: u32, required_length: usize) -> u64 {
        match (self, outcome) {
            (Self::FlatLength, _) => required_length as u64 * 100,
            (Self::RoundScaled, Outcome::GuesserWon) => u64::from(round) * 100,
            (Self::RoundScaled, Outcome::CreatorWon) => u64::from(round) * 50,
        }
    }
}

/// Default sequence length for each round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthSchedule {
    /// Every round starts at the base length.
    #[default]
    Fixed,
    /// Round `n` starts at `base + (n - 1)`.
    Growing,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scoring formula.
    pub scoring: ScoringRule,
    /// Per-round default length policy.
    pub length_schedule: LengthSchedule,
    /// Length of the first round. Clamped into range when used.
    pub base_length: usize,
    /// Pause after a resolved guess before the next round starts.
    pub advance_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringRule::default(),
            length_schedule: LengthSchedule::default(),
            base_length: MIN_SEQUENCE_LENGTH,
            advance_delay: DEFAULT_ADVANCE_DELAY,
        }
    }
}

impl GameConfig {
    /// Default `required_length` for a round.
    pub fn length_for_round(&self, round: u32) -> usize {
        match self.length_schedule {
            LengthSchedule::Fixed => clamp_length(self.base_length),
            LengthSchedule::Growing => {
                let extra = round.saturating_sub(1) as usize;
                clamp_length(self.base_length.saturating_add(extra))
            },
        }
    }
}

/// Seat that creates the sequence in `round`.
///
/// Odd rounds belong to the first seat, even rounds to the second.
pub fn creator_for_round(round: u32) -> Seat {
    if round % 2 == 1 { Seat::First } else { Seat::Second }
}

/// Clamp a requested length into `[MIN_SEQUENCE_LENGTH, MAX_SEQUENCE_LENGTH]`.
pub fn clamp_length(requested: usize) -> usize {
    requested.clamp(MIN_SEQUENCE_LENGTH, MAX_SEQUENCE_LENGTH)
}

/// True iff `candidate` is a non-empty prefix of `sequence`.
pub fn is_correct_prefix(sequence: &[Note], candidate: &[Note]) -> bool {
    !candidate.is_empty()
        && candidate.len() <= sequence.len()
        && sequence.iter().zip(candidate).all(|(expected, got)| expected == got)
}
