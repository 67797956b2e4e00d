//! Leaderboard contract and aggregation rules.
//!
//! The game only needs two operations from a leaderboard: record a score for
//! a player and fetch the ranked list. Backends implement [`Leaderboard`];
//! the aggregation itself ([`record_score`], [`rank`]) lives here so every
//! backend ranks players identically.
//!
//! Players are matched case-insensitively. Each submission counts as one
//! game played. The list is ordered by average score, highest first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::LeaderboardError;

/// A player's aggregated leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Player name as first submitted.
    pub name: String,
    /// Sum of all submitted scores.
    pub total_score: u64,
    /// Number of submissions.
    pub games_played: u32,
}

impl Standing {
    /// Entry for a player's first game.
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self { name: name.into(), total_score: score, games_played: 1 }
    }

    /// Add one game's score.
    pub fn record(&mut self, score: u64) {
        self.total_score = self.total_score.saturating_add(score);
        self.games_played = self.games_played.saturating_add(1);
    }

    /// Mean score per game. Zero when no games were played.
    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score as f64 / f64::from(self.games_played)
    }

    /// Compare by average without floating point: `a/b` vs `c/d` as `a*d`
    /// vs `c*b`.
    fn cmp_average(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.total_score) * u128::from(other.games_played.max(1));
        let rhs = u128::from(other.total_score) * u128::from(self.games_played.max(1));
        lhs.cmp(&rhs)
    }
}

/// Storage key for a player name.
pub fn player_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Sort standings by average score, highest first. Ties order by name.
pub fn rank(standings: &mut [Standing]) {
    standings.sort_by(|a, b| b.cmp_average(a).then_with(|| a.name.cmp(&b.name)));
}

/// Record `score` for `name` in `standings` and re-rank.
///
/// Returns the updated entry.
pub fn record_score(standings: &mut Vec<Standing>, name: &str, score: u64) -> Standing {
    let key = player_key(name);
    let existing = standings.iter_mut().find(|s| player_key(&s.name) == key);
    let updated = if let Some(existing) = existing {
        existing.record(score);
        existing.clone()
    } else {
        let standing = Standing::new(name.trim(), score);
        standings.push(standing.clone());
        standing
    };

    rank(standings);
    updated
}

/// Leaderboard backend.
///
/// Calls are synchronous and short. Their failures are never
/// allowed to block gameplay. Implementations share state between clones.
pub trait Leaderboard: Clone + Send + Sync + 'static {
    /// Record one game's score for a player.
    fn submit_score(&self, player: &str, score: u64) -> Result<Standing, LeaderboardError>;

    /// All standings, ranked.
    fn fetch(&self) -> Result<Vec<Standing>, LeaderboardError>;
}
