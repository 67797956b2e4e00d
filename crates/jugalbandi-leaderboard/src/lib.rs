//! Leaderboard backends for Piano Jugalbandi
//!
//! Implementations of [`jugalbandi_core::Leaderboard`]. All backends rank
//! through [`jugalbandi_core::leaderboard::record_score`], so they agree on
//! aggregation and ordering; they differ only in where standings live.
//!
//! - [`MemoryLeaderboard`]: process-local, for tests and ephemeral sessions
//! - [`RedbLeaderboard`]: durable, survives restarts
//! - [`ChaoticLeaderboard`]: wrapper that injects failures for chaos tests

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chaotic;
mod memory;
mod redb;

pub use chaotic::ChaoticLeaderboard;
pub use memory::MemoryLeaderboard;

pub use self::redb::RedbLeaderboard;
