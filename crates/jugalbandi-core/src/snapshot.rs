//! Read-only projection of game state for rendering.

use serde::{Deserialize, Serialize};

use crate::{GamePhase, Note, Player, Seat, rules::creator_for_round};

/// Snapshot of the observable game state.
///
/// Frontends and invariant checks read snapshots; only [`crate::Game`]
/// mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Both players, indexed by seat.
    pub players: [Player; 2],
    /// Current round.
    pub round: u32,
    /// Seat acting now.
    pub turn: Seat,
    /// Current phase.
    pub phase: GamePhase,
    /// Sequence for this round.
    pub sequence: Vec<Note>,
    /// Notes the creator must enter this round.
    pub required_length: usize,
    /// Lives left in the guess phase.
    pub lives: u8,
    /// Notes of the current attempt matched so far.
    pub guess_len: usize,
    /// A resolved round is waiting for the next one to start.
    pub awaiting_advance: bool,
}

impl GameSnapshot {
    /// Seat creating the sequence this round.
    pub fn creator(&self) -> Seat {
        creator_for_round(self.round)
    }

    /// Player in `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }
}
