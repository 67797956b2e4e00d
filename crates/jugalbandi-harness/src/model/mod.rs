//! Reference model for model-based testing.
//!
//! [`ModelGame`] is a deliberately plain restatement of the game rules:
//! flat fields, millisecond integers for time, keyboard indexes for notes.
//! Tests apply the same [`Operation`]s to it and to [`jugalbandi_core::Game`]
//! and compare [`ObservableState`] after every step.

mod game;
mod operation;

pub use game::{ModelGame, ObservableState};
pub use operation::{Operation, OperationError, OperationResult, SmallName};
