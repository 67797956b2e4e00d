//! Redb-backed durable leaderboard.
//!
//! One table keyed by the normalized player name. Each write runs in its own
//! transaction, so a submission is either fully recorded or not at all.

use std::{fmt, path::Path, sync::Arc};

use jugalbandi_core::{
    Leaderboard, LeaderboardError, Standing,
    leaderboard::{player_key, rank},
};
use redb::{Database, ReadableTable, TableDefinition};

/// Table: standings
/// Key: trimmed, lowercased player name
/// Value: CBOR-encoded Standing
const STANDINGS: TableDefinition<&str, &[u8]> = TableDefinition::new("standings");

/// Durable leaderboard backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbLeaderboard {
    db: Arc<Database>,
}

impl RedbLeaderboard {
    /// Open or create a leaderboard database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError::Io` if the database cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LeaderboardError> {
        let db = Database::create(path.as_ref()).map_err(io_error)?;

        let txn = db.begin_write().map_err(io_error)?;
        {
            let _ = txn.open_table(STANDINGS).map_err(io_error)?;
        }
        txn.commit().map_err(io_error)?;

        tracing::info!(path = %path.as_ref().display(), "leaderboard opened");
        Ok(Self { db: Arc::new(db) })
    }
}

impl Leaderboard for RedbLeaderboard {
    fn submit_score(&self, player: &str, score: u64) -> Result<Standing, LeaderboardError> {
        let key = player_key(player);
        let txn = self.db.begin_write().map_err(io_error)?;

        let standing = {
            let mut table = txn.open_table(STANDINGS).map_err(io_error)?;

            let existing = match table.get(key.as_str()).map_err(io_error)? {
                Some(value) => Some(decode(value.value())?),
                None => None,
            };

            let standing = match existing {
                Some(mut standing) => {
                    standing.record(score);
                    standing
                },
                None => Standing::new(player.trim(), score),
            };

            let bytes = encode(&standing)?;
            table.insert(key.as_str(), bytes.as_slice()).map_err(io_error)?;
            standing
        };

        txn.commit().map_err(io_error)?;

        tracing::debug!(
            player = %standing.name,
            score,
            games = standing.games_played,
            "score recorded"
        );
        Ok(standing)
    }

    fn fetch(&self) -> Result<Vec<Standing>, LeaderboardError> {
        let txn = self.db.begin_read().map_err(io_error)?;
        let table = txn.open_table(STANDINGS).map_err(io_error)?;

        let mut standings = Vec::new();
        for result in table.iter().map_err(io_error)? {
            let (_, value) = result.map_err(io_error)?;
            standings.push(decode(value.value())?);
        }

        rank(&mut standings);
        Ok(standings)
    }
}

fn encode(standing: &Standing) -> Result<Vec<u8>, LeaderboardError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(standing, &mut bytes)
        .map_err(|e| LeaderboardError::Serialization(e.to_string()))?;
    Ok(bytes)
}

fn decode(bytes: &[u8]) -> Result<Standing, LeaderboardError> {
    ciborium::from_reader(bytes).map_err(|e| LeaderboardError::Serialization(e.to_string()))
}

fn io_error(e: impl fmt::Display) -> LeaderboardError {
    LeaderboardError::Io(e.to_string())
}
