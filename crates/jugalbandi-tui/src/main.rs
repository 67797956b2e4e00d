//! Piano Jugalbandi terminal entry point.
//!
//! # Usage
//!
//! ```bash
//! # Default rules, leaderboard kept in memory
//! jugalbandi
//!
//! # Durable leaderboard, sequences grow by one note per round
//! jugalbandi --db scores.redb --growing
//!
//! # Debug logs go to a file so the game screen stays clean
//! jugalbandi --log-file jugalbandi.log --log-level debug
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::{Parser, ValueEnum};
use jugalbandi_core::{GameConfig, LengthSchedule, MIN_SEQUENCE_LENGTH, ScoringRule};
use jugalbandi_leaderboard::{MemoryLeaderboard, RedbLeaderboard};
use jugalbandi_tui::{Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Scoring formula selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scoring {
    /// Sequence length x 100 to the round winner
    Flat,
    /// Round x 100 to a successful guesser, round x 50 to a creator
    RoundScaled,
}

impl From<Scoring> for ScoringRule {
    fn from(scoring: Scoring) -> Self {
        match scoring {
            Scoring::Flat => Self::FlatLength,
            Scoring::RoundScaled => Self::RoundScaled,
        }
    }
}

/// Two-player piano memory game
#[derive(Parser, Debug)]
#[command(name = "jugalbandi")]
#[command(about = "Two-player piano memory game for the terminal")]
#[command(version)]
struct Args {
    /// Leaderboard database path
    ///
    /// If not provided, the leaderboard lives in memory for this session.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Notes per sequence (clamped to 3..=50)
    #[arg(short, long, default_value_t = MIN_SEQUENCE_LENGTH)]
    length: usize,

    /// Add one note to the sequence every round
    #[arg(short, long)]
    growing: bool,

    /// Scoring formula
    #[arg(long, value_enum, default_value_t = Scoring::Flat)]
    scoring: Scoring,

    /// Pause between a finished round and the next one, in milliseconds
    #[arg(long, default_value_t = 2000)]
    advance_delay_ms: u64,

    /// Write logs to this file (no logging without it)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            scoring: self.scoring.into(),
            length_schedule: if self.growing {
                LengthSchedule::Growing
            } else {
                LengthSchedule::Fixed
            },
            base_length: self.length,
            advance_delay: Duration::from_millis(self.advance_delay_ms),
        }
    }
}

/// Install a file subscriber. The terminal belongs to the game, so logs
/// never go to stdout or stderr.
fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.game_config();
    tracing::info!(?config, "Piano Jugalbandi starting");

    match &args.db {
        Some(path) => {
            let leaderboard = RedbLeaderboard::open(path)?;
            Runtime::new(TerminalDriver::new()?, leaderboard, config).run().await?;
        },
        None => {
            Runtime::new(TerminalDriver::new()?, MemoryLeaderboard::new(), config).run().await?;
        },
    }

    tracing::info!("Piano Jugalbandi exiting");
    Ok(())
}
