//! In-memory leaderboard.

use std::sync::{Arc, Mutex, MutexGuard};

use jugalbandi_core::{
    Leaderboard, LeaderboardError, Standing,
    leaderboard::{rank, record_score},
};

/// In-memory leaderboard for tests and sessions without a database.
///
/// Clones share the same standings.
#[derive(Clone, Default)]
pub struct MemoryLeaderboard {
    standings: Arc<Mutex<Vec<Standing>>>,
}

impl MemoryLeaderboard {
    /// Create an empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a leaderboard seeded with existing standings.
    pub fn with_standings(mut standings: Vec<Standing>) -> Self {
        rank(&mut standings);
        Self { standings: Arc::new(Mutex::new(standings)) }
    }

    /// Number of distinct players recorded.
    pub fn player_count(&self) -> usize {
        self.lock().map(|s| s.len()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Standing>>, LeaderboardError> {
        self.standings
            .lock()
            .map_err(|_| LeaderboardError::Unavailable("leaderboard lock poisoned".to_string()))
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn submit_score(&self, player: &str, score: u64) -> Result<Standing, LeaderboardError> {
        let mut standings = self.lock()?;
        Ok(record_score(&mut standings, player, score))
    }

    fn fetch(&self) -> Result<Vec<Standing>, LeaderboardError> {
        Ok(self.lock()?.clone())
    }
}
