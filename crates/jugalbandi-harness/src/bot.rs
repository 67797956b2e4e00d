//! Seeded players for whole-game simulation.
//!
//! A [`Bot`] looks at the app the way a person looks at the screen and picks
//! the next key. All randomness comes from a ChaCha RNG seeded with a `u64`,
//! so a failing seed replays the exact same game.

use std::{ops::Sub, time::Duration};

use jugalbandi_app::{App, KeyInput, Screen, keymap};
use jugalbandi_core::{GamePhase, KEYBOARD_SIZE, Note};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Player names the bots type on the welcome screen.
pub const BOT_NAMES: [&str; 2] = ["Asha", "Bo"];

/// Seeded player that drives an [`App`] through key presses.
#[derive(Debug, Clone)]
pub struct Bot {
    rng: ChaCha8Rng,
    /// Probability of pressing the right note while guessing.
    accuracy: f64,
    /// Probability of asking to change the length before creating.
    fiddle: f64,
}

impl Bot {
    /// Bot with the given seed and guessing accuracy in `[0, 1]`.
    pub fn new(seed: u64, accuracy: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
            fiddle: 0.1,
        }
    }

    /// Keys that fill in both names and start the game.
    pub fn sign_in() -> Vec<KeyInput> {
        let mut keys: Vec<KeyInput> = BOT_NAMES[0].chars().map(KeyInput::Char).collect();
        keys.push(KeyInput::Tab);
        keys.extend(BOT_NAMES[1].chars().map(KeyInput::Char));
        keys.push(KeyInput::Enter);
        keys
    }

    /// Next key for whoever is acting. `None` while nothing useful can be
    /// pressed: a resolved round waiting to advance, or a non-play screen.
    pub fn next_key<I>(&mut self, app: &App<I>) -> Option<KeyInput>
    where
        I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
    {
        if app.screen() != Screen::Play {
            return None;
        }

        let snapshot = app.snapshot();
        match snapshot.phase {
            GamePhase::Create => {
                if app.game().can_edit_length() && self.rng.gen_bool(self.fiddle) {
                    let key = if self.rng.gen_bool(0.5) { '+' } else { '-' };
                    return Some(KeyInput::Char(key));
                }
                self.random_note()
            },
            GamePhase::Guess if !snapshot.awaiting_advance => {
                let expected = snapshot.sequence.get(snapshot.guess_len).copied();
                match expected {
                    Some(note) if self.rng.gen_bool(self.accuracy) => key_for(note),
                    _ => self.random_note(),
                }
            },
            _ => None,
        }
    }

    fn random_note(&mut self) -> Option<KeyInput> {
        let note = Note::keyboard().nth(self.rng.gen_range(0..KEYBOARD_SIZE))?;
        key_for(note)
    }
}

fn key_for(note: Note) -> Option<KeyInput> {
    keymap::key_for_note(note).map(KeyInput::Char)
}
