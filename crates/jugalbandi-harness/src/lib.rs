//! Deterministic simulation harness for Piano Jugalbandi.
//!
//! A [`SimDriver`] with a virtual clock runs the production
//! [`jugalbandi_app::Runtime`] without a terminal, and seeded [`Bot`]s play
//! whole games from a `u64` seed so any failure replays exactly.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the game rules.
//! Operations are applied to both the model and the real
//! [`jugalbandi_core::Game`], and their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties that must hold after every
//! transition. Use [`InvariantRegistry::standard()`] for the game rules.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bot;
pub mod invariants;
pub mod model;
pub mod sim_driver;

pub use bot::Bot;
pub use invariants::{
    GamePointsWithinScore, Invariant, InvariantRegistry, InvariantResult, LivesInRange,
    RoleFollowsRound, RoundProgression, ScoresNeverDecrease, ScreenMatchesPhase,
    SequenceWithinLength, SystemSnapshot, Violation,
};
pub use model::{
    ModelGame, ObservableState, Operation, OperationError, OperationResult, SmallName,
};
pub use sim_driver::{SimDriver, SimDriverError, SimInstant};
