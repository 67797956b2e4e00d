//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! game behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!       ModelGame       RealGame       Compare
//!      (reference)   (virtual time)    Results
//! ```

use std::time::Duration;

use jugalbandi_core::{Game, GameConfig, LengthSchedule, Note, ScoringRule, Seat};
use jugalbandi_harness::{
    InvariantRegistry, ModelGame, ObservableState, Operation, OperationResult, SimInstant,
    SmallName, SystemSnapshot,
};
use proptest::prelude::*;

/// Real game wrapper that mirrors `ModelGame`'s interface.
struct RealGame {
    game: Game<SimInstant>,
    now: SimInstant,
    keyboard: Vec<Note>,
}

impl RealGame {
    fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config),
            now: SimInstant::ZERO,
            keyboard: Note::keyboard().collect(),
        }
    }

    fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::SetName { seat, name } => {
                self.game.set_player_name(Operation::seat(*seat), name.to_name()).into()
            },
            Operation::Start => self.game.start().into(),
            Operation::Press { key } => {
                let note = self.keyboard[Operation::key_index(*key)];
                self.game.submit_note(note, self.now);
                OperationResult::Ok
            },
            Operation::SetLength { length } => {
                self.game.set_required_length(usize::from(*length)).into()
            },
            Operation::AdvanceTime { millis } => {
                self.now = self.now.after(Duration::from_millis(u64::from(*millis)));
                self.game.tick(self.now);
                OperationResult::Ok
            },
            Operation::EndGame => self.game.end_game().into(),
            Operation::PlayAgain => self.game.play_again().into(),
            Operation::ReturnToWelcome => {
                self.game.return_to_welcome();
                OperationResult::Ok
            },
        }
    }

    fn observable_state(&self) -> ObservableState {
        let snapshot = self.game.snapshot();
        let index =
            |note: &Note| self.keyboard.iter().position(|k| k == note).unwrap_or(usize::MAX);

        ObservableState {
            phase: snapshot.phase,
            round: snapshot.round,
            turn: snapshot.turn,
            sequence: snapshot.sequence.iter().map(index).collect(),
            required_length: snapshot.required_length,
            lives: snapshot.lives,
            guess_len: snapshot.guess_len,
            names: Seat::BOTH.map(|s| snapshot.player(s).name.clone()),
            scores: Seat::BOTH.map(|s| snapshot.player(s).score),
            game_points: Seat::BOTH.map(|s| snapshot.player(s).game_points),
            awaiting_advance: snapshot.awaiting_advance,
        }
    }
}

fn small_name_strategy() -> impl Strategy<Value = SmallName> {
    (any::<u8>(), any::<u8>()).prop_map(|(seed, shape)| SmallName { seed, shape })
}

/// Strategy for generating operations, weighted towards play.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        2 => (0u8..2, small_name_strategy())
            .prop_map(|(seat, name)| Operation::SetName { seat, name }),
        2 => Just(Operation::Start),
        12 => any::<u8>().prop_map(|key| Operation::Press { key }),
        1 => any::<u8>().prop_map(|length| Operation::SetLength { length }),
        3 => (0u16..2500).prop_map(|millis| Operation::AdvanceTime { millis }),
        1 => Just(Operation::EndGame),
        1 => Just(Operation::PlayAgain),
        1 => Just(Operation::ReturnToWelcome),
    ]
}

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (
        prop_oneof![Just(ScoringRule::FlatLength), Just(ScoringRule::RoundScaled)],
        prop_oneof![Just(LengthSchedule::Fixed), Just(LengthSchedule::Growing)],
        0usize..8,
        0u64..3000,
    )
        .prop_map(|(scoring, length_schedule, base_length, delay)| GameConfig {
            scoring,
            length_schedule,
            base_length,
            advance_delay: Duration::from_millis(delay),
        })
}

/// Operations that name both players and start, so runs spend most of
/// their budget in play.
fn opening() -> Vec<Operation> {
    vec![
        Operation::SetName { seat: 0, name: SmallName { seed: 1, shape: 2 } },
        Operation::SetName { seat: 1, name: SmallName { seed: 2, shape: 3 } },
        Operation::Start,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Verify that operation results match between model and real game.
    ///
    /// This is the core model-based test. It generates random operation
    /// sequences and asserts both implementations return the same results
    /// and expose the same state after every step.
    #[test]
    fn prop_model_matches_real(
        config in config_strategy(),
        ops in prop::collection::vec(operation_strategy(), 0..300)
    ) {
        let mut model = ModelGame::new(config.clone());
        let mut real = RealGame::new(config);

        for (i, op) in opening().iter().chain(&ops).enumerate() {
            let model_result = model.apply(op);
            let real_result = real.apply(op);

            prop_assert_eq!(&model_result, &real_result, "result diverged at op {}: {:?}", i, op);
            prop_assert_eq!(
                model.observable_state(),
                real.observable_state(),
                "state diverged at op {}: {:?}",
                i,
                op
            );
        }
    }

    /// Every invariant holds after every operation, including the
    /// history-based ones.
    #[test]
    fn prop_invariants_hold_after_every_operation(
        ops in prop::collection::vec(operation_strategy(), 0..300)
    ) {
        let registry = InvariantRegistry::standard();
        let mut real = RealGame::new(GameConfig::default());
        let mut previous = real.game.snapshot();

        for op in opening().iter().chain(&ops) {
            real.apply(op);
            let current = real.game.snapshot();
            let state = SystemSnapshot::from_game(current.clone()).with_previous(previous);

            if let Err(violations) = registry.check_all(&state) {
                prop_assert!(false, "after {:?}: {:?}", op, violations);
            }
            previous = current;
        }
    }

    /// Errors are returned for exactly the operations the model rejects, and
    /// a rejected operation leaves state untouched.
    #[test]
    fn prop_rejections_do_not_mutate(
        ops in prop::collection::vec(operation_strategy(), 0..200)
    ) {
        let mut real = RealGame::new(GameConfig::default());

        for op in opening().iter().chain(&ops) {
            let before = real.observable_state();
            if real.apply(op).is_err() {
                prop_assert_eq!(before, real.observable_state(), "{:?} mutated state", op);
            }
        }
    }
}

#[test]
fn model_and_real_agree_on_a_scripted_game() {
    let mut model = ModelGame::new(GameConfig::default());
    let mut real = RealGame::new(GameConfig::default());

    let mut script = opening();
    script.extend([0, 1, 2, 0, 1, 2].map(|key| Operation::Press { key }));
    script.push(Operation::AdvanceTime { millis: 2000 });
    script.extend([3, 3, 3, 0, 0, 0].map(|key| Operation::Press { key }));
    script.push(Operation::EndGame);
    script.push(Operation::PlayAgain);

    for op in &script {
        assert_eq!(model.apply(op), real.apply(op), "{op:?}");
    }

    let state = real.observable_state();
    assert_eq!(state, model.observable_state());
    assert_eq!(state.scores, [0, 600]);
    assert_eq!(state.game_points, [0, 0]);
    assert_eq!(state.round, 1);
}
