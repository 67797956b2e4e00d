//! Model game - the reference implementation.
//!
//! Restates the rules with plain data and no shared code paths beyond the
//! configuration type, so a bug in [`jugalbandi_core::Game`] cannot hide in
//! the oracle as well.

use jugalbandi_core::{GameConfig, GamePhase, LengthSchedule, ScoringRule, Seat};

use super::operation::{Operation, OperationError, OperationResult};

const LIVES: u8 = 3;
const SHORTEST: usize = 3;
const LONGEST: usize = 50;

/// Observable state for oracle comparison.
///
/// This is the subset of game state that can be compared against the real
/// implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Current phase.
    pub phase: GamePhase,
    /// Current round.
    pub round: u32,
    /// Seat acting now.
    pub turn: Seat,
    /// Sequence as keyboard indexes.
    pub sequence: Vec<usize>,
    /// Notes required this round.
    pub required_length: usize,
    /// Lives left.
    pub lives: u8,
    /// Length of the guesser's attempt.
    pub guess_len: usize,
    /// Player names, by seat.
    pub names: [String; 2],
    /// Session scores, by seat.
    pub scores: [u64; 2],
    /// Points from the current game, by seat.
    pub game_points: [u64; 2],
    /// A resolved round waits to advance.
    pub awaiting_advance: bool,
}

/// Model game state.
#[derive(Debug, Clone)]
pub struct ModelGame {
    config: GameConfig,
    names: [String; 2],
    scores: [u64; 2],
    game_points: [u64; 2],
    phase: GamePhase,
    round: u32,
    turn: Seat,
    sequence: Vec<usize>,
    required: usize,
    lives: u8,
    guess: Vec<usize>,
    /// Virtual time the current round resolved at.
    resolved_at: Option<u64>,
    now_ms: u64,
}

impl ModelGame {
    /// Fresh game on the welcome screen.
    pub fn new(config: GameConfig) -> Self {
        let mut model = Self {
            config,
            names: [String::new(), String::new()],
            scores: [0; 2],
            game_points: [0; 2],
            phase: GamePhase::Welcome,
            round: 1,
            turn: Seat::First,
            sequence: Vec::new(),
            required: 0,
            lives: LIVES,
            guess: Vec::new(),
            resolved_at: None,
            now_ms: 0,
        };
        model.required = model.length_for(1);
        model
    }

    /// Virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Apply an operation and return the result.
    ///
    /// This is the main entry point for model-based testing. The result
    /// should match the real implementation's result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::SetName { seat, name } => {
                if self.phase != GamePhase::Welcome {
                    return OperationResult::Error(OperationError::NamesLocked);
                }
                self.names[Operation::seat(*seat).index()] = name.to_name();
                OperationResult::Ok
            },
            Operation::Start => self.apply_start(),
            Operation::Press { key } => {
                self.apply_press(Operation::key_index(*key));
                OperationResult::Ok
            },
            Operation::SetLength { length } => {
                if self.phase != GamePhase::Create {
                    return OperationResult::Error(OperationError::InvalidState);
                }
                if !self.sequence.is_empty() {
                    return OperationResult::Error(OperationError::LengthLocked);
                }
                self.required = usize::from(*length).clamp(SHORTEST, LONGEST);
                OperationResult::Ok
            },
            Operation::AdvanceTime { millis } => {
                self.now_ms += u64::from(*millis);
                self.apply_advance();
                OperationResult::Ok
            },
            Operation::EndGame => {
                if !matches!(self.phase, GamePhase::Create | GamePhase::Guess) {
                    return OperationResult::Error(OperationError::InvalidState);
                }
                self.resolved_at = None;
                self.guess.clear();
                self.phase = GamePhase::End;
                OperationResult::Ok
            },
            Operation::PlayAgain => {
                if self.phase != GamePhase::End {
                    return OperationResult::Error(OperationError::InvalidState);
                }
                self.resolved_at = None;
                self.game_points = [0; 2];
                self.begin_round(1);
                OperationResult::Ok
            },
            Operation::ReturnToWelcome => {
                let now_ms = self.now_ms;
                *self = Self::new(self.config.clone());
                self.now_ms = now_ms;
                OperationResult::Ok
            },
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            phase: self.phase,
            round: self.round,
            turn: self.turn,
            sequence: self.sequence.clone(),
            required_length: self.required,
            lives: self.lives,
            guess_len: self.guess.len(),
            names: self.names.clone(),
            scores: self.scores,
            game_points: self.game_points,
            awaiting_advance: self.resolved_at.is_some(),
        }
    }

    fn apply_start(&mut self) -> OperationResult {
        if self.phase != GamePhase::Welcome {
            return OperationResult::Error(OperationError::InvalidState);
        }
        if let Some(i) = self.names.iter().position(|n| n.trim().is_empty()) {
            let seat = if i == 0 { Seat::First } else { Seat::Second };
            return OperationResult::Error(OperationError::BlankName(seat));
        }

        for name in &mut self.names {
            *name = name.trim().to_string();
        }
        self.scores = [0; 2];
        self.game_points = [0; 2];
        self.begin_round(1);
        OperationResult::Ok
    }

    fn apply_press(&mut self, key: usize) {
        match self.phase {
            GamePhase::Create if self.sequence.len() < self.required => {
                self.sequence.push(key);
                if self.sequence.len() == self.required {
                    self.phase = GamePhase::Guess;
                    self.turn = self.turn.other();
                }
            },
            GamePhase::Guess if self.resolved_at.is_none() => {
                self.guess.push(key);
                let matches = self.sequence.starts_with(&self.guess);
                if matches && self.guess.len() == self.sequence.len() {
                    self.resolve(self.turn, true);
                } else if !matches {
                    self.guess.clear();
                    self.lives -= 1;
                    if self.lives == 0 {
                        self.resolve(self.turn.other(), false);
                    }
                }
            },
            _ => {},
        }
    }

    fn apply_advance(&mut self) {
        let Some(resolved_at) = self.resolved_at else {
            return;
        };
        let delay = self.config.advance_delay.as_millis() as u64;
        if self.now_ms - resolved_at >= delay {
            self.resolved_at = None;
            self.begin_round(self.round + 1);
        }
    }

    fn resolve(&mut self, winner: Seat, guesser_won: bool) {
        let points = match (self.config.scoring, guesser_won) {
            (ScoringRule::FlatLength, _) => self.required as u64 * 100,
            (ScoringRule::RoundScaled, true) => u64::from(self.round) * 100,
            (ScoringRule::RoundScaled, false) => u64::from(self.round) * 50,
        };
        self.scores[winner.index()] += points;
        self.game_points[winner.index()] += points;
        self.resolved_at = Some(self.now_ms);
    }

    fn begin_round(&mut self, round: u32) {
        self.round = round;
        self.turn = if round % 2 == 1 { Seat::First } else { Seat::Second };
        self.sequence.clear();
        self.guess.clear();
        self.lives = LIVES;
        self.required = self.length_for(round);
        self.phase = GamePhase::Create;
    }

    fn length_for(&self, round: u32) -> usize {
        let extra = match self.config.length_schedule {
            LengthSchedule::Fixed => 0,
            LengthSchedule::Growing => round as usize - 1,
        };
        (self.config.base_length + extra).clamp(SHORTEST, LONGEST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SmallName;

    fn named() -> ModelGame {
        let mut model = ModelGame::new(GameConfig::default());
        for seat in 0..2 {
            model.apply(&Operation::SetName { seat, name: SmallName { seed: seat, shape: 2 } });
        }
        model
    }

    fn press_all(model: &mut ModelGame, keys: &[u8]) {
        for &key in keys {
            model.apply(&Operation::Press { key });
        }
    }

    #[test]
    fn blank_name_blocks_start() {
        let mut model = ModelGame::new(GameConfig::default());
        model.apply(&Operation::SetName { seat: 0, name: SmallName { seed: 1, shape: 2 } });

        assert_eq!(
            model.apply(&Operation::Start),
            OperationResult::Error(OperationError::BlankName(Seat::Second))
        );
    }

    #[test]
    fn successful_guess_scores_and_advances_after_delay() {
        let mut model = named();
        model.apply(&Operation::Start);
        press_all(&mut model, &[0, 1, 2, 0, 1, 2]);

        let state = model.observable_state();
        assert_eq!(state.scores, [0, 300]);
        assert!(state.awaiting_advance);

        model.apply(&Operation::AdvanceTime { millis: 1999 });
        assert_eq!(model.observable_state().round, 1);
        model.apply(&Operation::AdvanceTime { millis: 1 });
        assert_eq!(model.observable_state().round, 2);
        assert_eq!(model.observable_state().turn, Seat::Second);
    }

    #[test]
    fn three_misses_award_creator() {
        let mut model = named();
        model.apply(&Operation::Start);
        press_all(&mut model, &[0, 0, 0, 1, 1, 1]);

        let state = model.observable_state();
        assert_eq!((state.lives, state.scores), (0, [300, 0]));
    }

    #[test]
    fn end_cancels_scheduled_advance() {
        let mut model = named();
        model.apply(&Operation::Start);
        press_all(&mut model, &[0, 0, 0, 0, 0, 0]);
        model.apply(&Operation::EndGame);
        model.apply(&Operation::AdvanceTime { millis: 5000 });

        let state = model.observable_state();
        assert_eq!((state.phase, state.round, state.awaiting_advance), (GamePhase::End, 1, false));
    }
}
