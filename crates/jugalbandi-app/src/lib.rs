//! Application layer for Piano Jugalbandi
//!
//! Pure state machines and a generic runtime around the game core, so that
//! deterministic simulation runs the same code as the terminal frontend.
//!
//! # Components
//!
//! - [`App`]: UI state machine (screens, key handling, status messages)
//! - [`ScoreBridge`]: Leaderboard bridge (executes leaderboard actions)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod input;
pub mod keymap;
mod runtime;
mod state;

pub use action::{AppAction, Sound};
pub use app::App;
pub use bridge::ScoreBridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::{LeaderboardView, Screen};
