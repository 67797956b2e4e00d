//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the app at a point in time.
//! Invariants operate on snapshots rather than live state so checks see one
//! consistent view.

use std::{ops::Sub, time::Duration};

use jugalbandi_app::{App, Screen};
use jugalbandi_core::GameSnapshot;

/// Snapshot of the observable system state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSnapshot {
    /// Screen the app is showing.
    pub screen: Screen,
    /// Game state now.
    pub game: GameSnapshot,
    /// Game state before the last transition, for history checks.
    pub previous: Option<GameSnapshot>,
}

impl SystemSnapshot {
    /// Capture the app's current state without history.
    pub fn from_app<I>(app: &App<I>) -> Self
    where
        I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
    {
        Self { screen: app.screen(), game: app.snapshot(), previous: None }
    }

    /// Snapshot of a bare game state. The screen is derived from its phase.
    pub fn from_game(game: GameSnapshot) -> Self {
        Self { screen: Screen::from(game.phase), game, previous: None }
    }

    /// Attach the state from before the last transition.
    #[must_use]
    pub fn with_previous(mut self, previous: GameSnapshot) -> Self {
        self.previous = Some(previous);
        self
    }
}
