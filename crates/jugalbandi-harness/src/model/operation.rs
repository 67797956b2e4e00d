//! Operations for model-based testing.
//!
//! Operations represent everything players and time can do to a game. They
//! are generated randomly by proptest (or decoded by the fuzzer) and applied
//! to both the model and the real implementation.

use arbitrary::Arbitrary;
use jugalbandi_core::{GameError, Seat};

/// Piano keys reachable by operations. Kept small so guesses often match.
pub const MODEL_KEYS: u8 = 4;

/// Operations that can be applied to a game.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Set a player's name (seat index taken modulo 2).
    SetName {
        /// Seat index.
        seat: u8,
        /// Name to set.
        name: SmallName,
    },

    /// Start the game from the welcome screen.
    Start,

    /// The acting player presses a key (index taken modulo [`MODEL_KEYS`]).
    Press {
        /// Keyboard index.
        key: u8,
    },

    /// Request a sequence length for the current round.
    SetLength {
        /// Requested length, clamped by the game.
        length: u8,
    },

    /// Advance time.
    ///
    /// Fires the scheduled round advance once the delay has elapsed.
    AdvanceTime {
        /// Milliseconds to advance.
        millis: u16,
    },

    /// End the game.
    EndGame,

    /// Play again from the end screen.
    PlayAgain,

    /// Reset everything and go back to name entry.
    ReturnToWelcome,
}

impl Operation {
    /// Seat addressed by a raw seat index.
    pub fn seat(index: u8) -> Seat {
        if index % 2 == 0 { Seat::First } else { Seat::Second }
    }

    /// Keyboard index addressed by a raw key.
    pub fn key_index(key: u8) -> usize {
        usize::from(key % MODEL_KEYS)
    }
}

/// Compact player name for testing.
///
/// Covers the cases the rules care about: empty, whitespace-only, plain and
/// padded names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub struct SmallName {
    /// Name seed.
    pub seed: u8,
    /// Shape selector (0-3 maps to empty/blank/plain/padded).
    pub shape: u8,
}

impl SmallName {
    /// Expand to the actual name string.
    pub fn to_name(self) -> String {
        match self.shape % 4 {
            0 => String::new(),
            1 => "   ".to_string(),
            2 => format!("p{}", self.seed),
            _ => format!("  P{} ", self.seed),
        }
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded or was ignored without error.
    Ok,

    /// Operation was rejected.
    Error(OperationError),
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

impl<T> From<Result<T, GameError>> for OperationResult {
    fn from(result: Result<T, GameError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => Self::Error(e.into()),
        }
    }
}

/// Rejections the rules allow, without the real error's context strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// A name is blank at start.
    BlankName(Seat),

    /// Names are locked after the welcome screen.
    NamesLocked,

    /// The creator already played a note this round.
    LengthLocked,

    /// Operation not valid in the current phase.
    InvalidState,
}

impl From<GameError> for OperationError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::BlankName { seat } => Self::BlankName(seat),
            GameError::NamesLocked => Self::NamesLocked,
            GameError::LengthLocked => Self::LengthLocked,
            GameError::InvalidState { .. } => Self::InvalidState,
        }
    }
}
