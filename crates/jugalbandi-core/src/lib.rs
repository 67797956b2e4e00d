//! Game core for Piano Jugalbandi
//!
//! A two-player memory game on a piano keyboard: one player creates a note
//! sequence, the other reproduces it. This crate holds the pure rules engine
//! and the contracts the frontends plug into.
//!
//! # Components
//!
//! - [`Game`]: Turn-based state machine (roles, sequence, lives, scoring)
//! - [`GameConfig`]: Session rules (scoring formula, length schedule, pacing)
//! - [`Note`]: Opaque note token, parsed from `C#4`-style names
//! - [`Leaderboard`]: Two-operation contract for score aggregation backends

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod error;
mod game;
pub mod leaderboard;
mod note;
mod player;
pub mod rules;
mod snapshot;

pub use action::{FinalScore, GameAction, RoundResult, winner};
pub use error::{GameError, LeaderboardError, NoteParseError};
pub use game::{Game, GamePhase};
pub use leaderboard::{Leaderboard, Standing};
pub use note::{HIGHEST_OCTAVE, KEYBOARD_SIZE, LOWEST_OCTAVE, Note, PitchClass};
pub use player::{Player, Seat};
pub use rules::{
    GameConfig, LengthSchedule, MAX_LIVES, MAX_SEQUENCE_LENGTH, MIN_SEQUENCE_LENGTH, Outcome,
    ScoringRule,
};
pub use snapshot::GameSnapshot;
