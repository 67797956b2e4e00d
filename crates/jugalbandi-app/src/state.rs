//! Observable application state types.
//!
//! View-model pieces the renderer needs beyond the game snapshot: which
//! screen is up, which name field has focus, and what the leaderboard view
//! currently holds.

use jugalbandi_core::{GamePhase, Standing};

/// Screen shown for the current game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Name entry.
    Welcome,
    /// Create and guess phases.
    Play,
    /// Final scores and leaderboard.
    End,
}

impl From<GamePhase> for Screen {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Welcome => Self::Welcome,
            GamePhase::Create | GamePhase::Guess => Self::Play,
            GamePhase::End => Self::End,
        }
    }
}

/// Leaderboard view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LeaderboardView {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Request sent, waiting for standings.
    Loading,
    /// Latest standings, ranked.
    Ready(Vec<Standing>),
    /// Last request failed.
    Unavailable(String),
}

impl LeaderboardView {
    /// Standings to display. Empty unless ready.
    pub fn standings(&self) -> &[Standing] {
        match self {
            Self::Ready(standings) => standings,
            Self::Idle | Self::Loading | Self::Unavailable(_) => &[],
        }
    }
}
