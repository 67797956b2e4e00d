//! Chaotic leaderboard wrapper for fault injection testing
//!
//! Delegates to another backend but fails a seeded fraction of calls with
//! `LeaderboardError::Unavailable`. Lets tests check that leaderboard
//! failures never reach gameplay.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use jugalbandi_core::{Leaderboard, LeaderboardError, Standing};

/// Seed used by [`ChaoticLeaderboard::new`].
const DEFAULT_SEED: u64 = 0x5EED_0F_A11;

/// Leaderboard wrapper that randomly injects failures.
///
/// Clones share the RNG and the operation counter.
#[derive(Clone)]
pub struct ChaoticLeaderboard<L: Leaderboard> {
    inner: L,
    /// Failure rate (0.0 = never fail, 1.0 = always fail)
    failure_rate: f64,
    rng: Arc<Mutex<ChaoticRng>>,
    operation_count: Arc<AtomicUsize>,
}

/// Linear congruential generator. Same seed, same failure pattern.
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0.0, 1.0)
    fn next(&mut self) -> f64 {
        // Numerical Recipes constants
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = A.wrapping_mul(self.state).wrapping_add(C) % M;
        (self.state as f64) / (M as f64)
    }
}

impl<L: Leaderboard> ChaoticLeaderboard<L> {
    /// Wrap `inner` with the default seed.
    pub fn new(inner: L, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, DEFAULT_SEED)
    }

    /// Wrap `inner` with an explicit seed for reproducible chaos.
    ///
    /// `failure_rate` is clamped to `[0.0, 1.0]`.
    pub fn with_seed(inner: L, failure_rate: f64, seed: u64) -> Self {
        Self {
            inner,
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            operation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Underlying backend (for checking state after chaos).
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Calls attempted through this wrapper, failed ones included.
    pub fn operation_count(&self) -> usize {
        self.operation_count.load(Ordering::Relaxed)
    }

    fn inject(&self, operation: &str) -> Result<(), LeaderboardError> {
        self.operation_count.fetch_add(1, Ordering::Relaxed);

        let roll = match self.rng.lock() {
            Ok(mut rng) => rng.next(),
            Err(_) => return Err(unavailable(operation)),
        };

        if roll < self.failure_rate {
            tracing::debug!(operation, "injected leaderboard failure");
            return Err(unavailable(operation));
        }
        Ok(())
    }
}

fn unavailable(operation: &str) -> LeaderboardError {
    LeaderboardError::Unavailable(format!("chaotic failure injection during {operation}"))
}

impl<L: Leaderboard> Leaderboard for ChaoticLeaderboard<L> {
    fn submit_score(&self, player: &str, score: u64) -> Result<Standing, LeaderboardError> {
        self.inject("submit")?;
        self.inner.submit_score(player, score)
    }

    fn fetch(&self) -> Result<Vec<Standing>, LeaderboardError> {
        self.inject("fetch")?;
        self.inner.fetch()
    }
}
