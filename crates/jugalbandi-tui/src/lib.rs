//! Terminal UI for Piano Jugalbandi
//!
//! A thin shell over [`jugalbandi_app::Driver`] that provides
//! terminal-specific I/O. All orchestration logic lives in the generic
//! [`jugalbandi_app::Runtime`].
//!
//! This crate only handles terminal input, rendering and sound cues.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use jugalbandi_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime, ScoreBridge};
pub use terminal::{TerminalDriver, TerminalError};
