//! Application side-effects and intents.
//!
//! [`AppAction`]s are produced by the [`crate::App`] state machine and
//! executed by the runtime.

use jugalbandi_core::{FinalScore, Note};

/// Sound cues. Playback is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// A piano key was played.
    Note(Note),
    /// The guesser reproduced the sequence.
    Success,
    /// The guesser ran out of lives.
    Failure,
}

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Play a sound cue.
    Play(Sound),

    /// Post both players' results to the leaderboard.
    SubmitScores {
        /// Final scores of the game that just ended.
        results: [FinalScore; 2],
    },

    /// Refresh the leaderboard view.
    FetchLeaderboard,
}
