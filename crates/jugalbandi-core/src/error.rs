//! Error types for the game core.
//!
//! Guarded transitions return [`GameError`] instead of silently mutating
//! state. Frontends surface these as status messages; none of them is fatal.
//! Leaderboard backends report [`LeaderboardError`], which callers log and
//! swallow.

use thiserror::Error;

use crate::{GamePhase, Seat};

/// Errors returned by guarded [`crate::Game`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A player name is empty or whitespace.
    #[error("{seat} needs a name before the game can start")]
    BlankName {
        /// Seat with the blank name.
        seat: Seat,
    },

    /// Names can only change on the welcome screen.
    #[error("player names are locked once the game has started")]
    NamesLocked,

    /// The sequence length can only change before the creator plays a note.
    #[error("sequence length is locked once the creator has started playing")]
    LengthLocked,

    /// Operation not valid in the current phase.
    #[error("invalid state transition: cannot {operation} during {phase}")]
    InvalidState {
        /// Phase when the operation was attempted.
        phase: GamePhase,
        /// Operation that was attempted.
        operation: &'static str,
    },
}

/// Errors reported by leaderboard backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Backend storage failed.
    #[error("leaderboard I/O error: {0}")]
    Io(String),

    /// Stored standing could not be encoded or decoded.
    #[error("leaderboard serialization error: {0}")]
    Serialization(String),

    /// Backend refused or could not be reached.
    #[error("leaderboard unavailable: {0}")]
    Unavailable(String),
}

/// Errors from parsing a [`crate::Note`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteParseError {
    /// No octave digit found.
    #[error("note {0:?} has no octave")]
    MissingOctave(String),

    /// Pitch class not recognised.
    #[error("unknown pitch {0:?}")]
    UnknownPitch(String),

    /// Octave is not a number.
    #[error("invalid octave {0:?}")]
    InvalidOctave(String),
}
