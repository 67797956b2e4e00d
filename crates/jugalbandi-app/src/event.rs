//! Application input events.
//!
//! [`AppEvent`] is the full set of inputs that drive the [`crate::App`]
//! state machine. Events come from two sources:
//! - User interactions (keyboard, resize) and periodic ticks.
//! - Leaderboard results translated by [`crate::ScoreBridge`].

use jugalbandi_core::Standing;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Fresh leaderboard standings, ranked.
    LeaderboardUpdated(Vec<Standing>),

    /// A leaderboard call failed.
    LeaderboardUnavailable {
        /// Error description.
        message: String,
    },
}
