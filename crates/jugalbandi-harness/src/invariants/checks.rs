//! Standard invariant checks.
//!
//! These invariants capture the game rules that must hold after every
//! transition, whatever sequence of keys and ticks led there.

use jugalbandi_app::Screen;
use jugalbandi_core::{GamePhase, MAX_LIVES, Seat, rules::creator_for_round};

use super::{Invariant, InvariantResult, SystemSnapshot};

/// The acting seat follows from round parity and phase.
///
/// The first seat creates in odd rounds, the second in even rounds; the
/// other seat guesses.
pub struct RoleFollowsRound;

impl Invariant for RoleFollowsRound {
    fn name(&self) -> &'static str {
        "RoleFollowsRound"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let game = &state.game;
        let creator = creator_for_round(game.round);
        let expected = match game.phase {
            GamePhase::Create => creator,
            GamePhase::Guess => creator.other(),
            GamePhase::Welcome | GamePhase::End => return Ok(()),
        };

        if game.turn != expected {
            return Err(self.violation(format!(
                "round {} {}: {} is acting, expected {}",
                game.round, game.phase, game.turn, expected
            )));
        }
        Ok(())
    }
}

/// The sequence never outgrows the required length and the guesser's
/// attempt never outgrows the sequence.
///
/// A creator always has notes left to play; a guesser holds a complete
/// attempt only while the round waits to advance.
pub struct SequenceWithinLength;

impl Invariant for SequenceWithinLength {
    fn name(&self) -> &'static str {
        "SequenceWithinLength"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let game = &state.game;
        let len = game.sequence.len();

        if len > game.required_length {
            return Err(self.violation(format!(
                "sequence of {len} notes exceeds required {}",
                game.required_length
            )));
        }

        match game.phase {
            GamePhase::Welcome if len > 0 => {
                Err(self.violation(format!("{len} notes recorded before the game started")))
            },
            GamePhase::Create if len == game.required_length || game.guess_len > 0 => {
                Err(self.violation(format!(
                    "create phase with {len}/{} notes and a {}-note attempt",
                    game.required_length, game.guess_len
                )))
            },
            GamePhase::Guess if len != game.required_length => Err(self.violation(format!(
                "guess phase on a {len}-note sequence, required {}",
                game.required_length
            ))),
            GamePhase::Guess if game.guess_len > len => {
                Err(self.violation(format!("attempt of {} notes on {len}", game.guess_len)))
            },
            GamePhase::Guess if game.guess_len == len && !game.awaiting_advance => {
                Err(self.violation("complete attempt without a resolved round".into()))
            },
            _ => Ok(()),
        }
    }
}

/// Lives stay within `0..=3`; a guesser with no lives left has lost the
/// round.
pub struct LivesInRange;

impl Invariant for LivesInRange {
    fn name(&self) -> &'static str {
        "LivesInRange"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let game = &state.game;

        if game.lives > MAX_LIVES {
            return Err(self.violation(format!("lives {} > {MAX_LIVES}", game.lives)));
        }
        if game.phase == GamePhase::Create && game.lives != MAX_LIVES {
            return Err(self.violation(format!("creator phase with {} lives", game.lives)));
        }
        if game.phase == GamePhase::Guess && game.lives == 0 && !game.awaiting_advance {
            return Err(self.violation("guesser out of lives but round unresolved".into()));
        }
        Ok(())
    }
}

/// Points from the current game are part of the session score.
pub struct GamePointsWithinScore;

impl Invariant for GamePointsWithinScore {
    fn name(&self) -> &'static str {
        "GamePointsWithinScore"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for seat in Seat::BOTH {
            let player = state.game.player(seat);
            if player.game_points > player.score {
                return Err(self.violation(format!(
                    "{seat}: {} game points but score {}",
                    player.game_points, player.score
                )));
            }
        }
        Ok(())
    }
}

/// The screen shown agrees with the game phase.
pub struct ScreenMatchesPhase;

impl Invariant for ScreenMatchesPhase {
    fn name(&self) -> &'static str {
        "ScreenMatchesPhase"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let expected = Screen::from(state.game.phase);
        if state.screen != expected {
            return Err(self.violation(format!(
                "{:?} screen in {} phase",
                state.screen, state.game.phase
            )));
        }
        Ok(())
    }
}

/// Session scores never decrease, except when returning to the welcome
/// screen resets everything.
///
/// Requires a previous snapshot; passes trivially without one.
pub struct ScoresNeverDecrease;

impl Invariant for ScoresNeverDecrease {
    fn name(&self) -> &'static str {
        "ScoresNeverDecrease"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(previous) = &state.previous else {
            return Ok(());
        };
        if state.game.phase == GamePhase::Welcome {
            return Ok(());
        }

        for seat in Seat::BOTH {
            let (before, after) = (previous.player(seat).score, state.game.player(seat).score);
            if after < before {
                return Err(self.violation(format!("{seat}: score fell {before} -> {after}")));
            }
        }
        Ok(())
    }
}

/// Rounds advance one at a time, only out of a resolved round, or restart
/// at one.
///
/// Requires a previous snapshot; passes trivially without one.
pub struct RoundProgression;

impl Invariant for RoundProgression {
    fn name(&self) -> &'static str {
        "RoundProgression"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(previous) = &state.previous else {
            return Ok(());
        };
        let (before, after) = (previous.round, state.game.round);

        if after == before || after == 1 {
            return Ok(());
        }
        if after == before + 1 && previous.awaiting_advance {
            return Ok(());
        }
        Err(self.violation(format!(
            "round {before} -> {after} (awaiting advance: {})",
            previous.awaiting_advance
        )))
    }
}
