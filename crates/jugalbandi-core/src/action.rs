//! Game side-effects.
//!
//! [`GameAction`]s are produced by [`crate::Game`] transitions. The game never
//! performs I/O itself: frontends turn these into sounds, status messages and
//! leaderboard submissions.

use serde::{Deserialize, Serialize};

use crate::{Note, Outcome, Seat};

/// Actions produced by the game state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    /// A note was accepted from `seat`. Play it.
    PlayNote {
        /// Seat that pressed the key.
        seat: Seat,
        /// Note pressed.
        note: Note,
    },

    /// The creator finished the sequence and guessing begins.
    GuessStarted {
        /// Seat that must reproduce the sequence.
        guesser: Seat,
        /// Length of the frozen sequence.
        length: usize,
    },

    /// A wrong note cost the guesser a life.
    LifeLost {
        /// Guessing seat.
        seat: Seat,
        /// Lives left after this mistake.
        lives_remaining: u8,
    },

    /// The guess phase ended and points were awarded.
    RoundResolved(RoundResult),

    /// A round started in the create phase.
    RoundStarted {
        /// Round number.
        round: u32,
        /// Seat creating the sequence.
        creator: Seat,
        /// Notes the creator must enter.
        required_length: usize,
    },

    /// The game ended on request.
    GameEnded {
        /// Final results, indexed by seat.
        results: [FinalScore; 2],
    },

    /// Everything was cleared back to the welcome screen.
    ReturnedToWelcome,
}

/// Result of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round that ended.
    pub round: u32,
    /// How the guess phase ended.
    pub outcome: Outcome,
    /// Seat that received the points.
    pub awarded_to: Seat,
    /// Points awarded.
    pub points: u64,
}

/// A player's standing when the game ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    /// Seat of the player.
    pub seat: Seat,
    /// Player name.
    pub name: String,
    /// Points earned in this game (since start or play-again).
    pub game_points: u64,
    /// Session total.
    pub score: u64,
}

/// Winner of a finished game. `None` on a tie.
pub fn winner(results: &[FinalScore; 2]) -> Option<&FinalScore> {
    let [first, second] = results;
    match first.score.cmp(&second.score) {
        std::cmp::Ordering::Greater => Some(first),
        std::cmp::Ordering::Less => Some(second),
        std::cmp::Ordering::Equal => None,
    }
}
