//! Seats and players.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two fixed player positions.
///
/// Seat identity is stable for the whole session: `First` is index 0 and
/// `Second` is index 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// Player 1 (index 0).
    First,
    /// Player 2 (index 1).
    Second,
}

impl Seat {
    /// Both seats in index order.
    pub const BOTH: [Self; 2] = [Self::First, Self::Second];

    /// The opposing seat.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Array index of this seat.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

/// A player and their running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name. Non-blank once the game has started.
    pub name: String,
    /// Score accumulated this session. Never decreases until a full reset.
    pub score: u64,
    /// Points earned since the last start or play-again.
    pub game_points: u64,
}

impl Player {
    /// Name is empty or whitespace only.
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }

    pub(crate) fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
        self.game_points = self.game_points.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_an_involution() {
        for seat in Seat::BOTH {
            assert_ne!(seat.other(), seat);
            assert_eq!(seat.other().other(), seat);
        }
    }

    #[test]
    fn whitespace_names_are_blank() {
        let player = Player { name: "  \t".into(), ..Player::default() };
        assert!(player.has_blank_name());
        assert!(!Player { name: " A ".into(), ..Player::default() }.has_blank_name());
    }

    #[test]
    fn award_updates_both_totals() {
        let mut player = Player { name: "A".into(), score: 500, game_points: 0 };
        player.award(300);
        assert_eq!((player.score, player.game_points), (800, 300));
    }
}
