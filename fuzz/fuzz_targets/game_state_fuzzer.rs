//! Fuzz target for the Game state machine
//!
//! Drive the real game and the reference model with the same operations
//!
//! # Strategy
//!
//! - Config: arbitrary scoring, length schedule, base length and delay
//! - Operations: names, start, keys, length requests, time, end, replay
//! - Every step: compare results and observable state, run invariants
//!
//! # Invariants
//!
//! - Real game and model agree after every operation
//! - Rejected operations leave state untouched
//! - Standard invariant registry holds, history checks included

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use jugalbandi_core::{Game, GameConfig, LengthSchedule, Note, ScoringRule, Seat};
use jugalbandi_harness::{
    InvariantRegistry, ModelGame, ObservableState, Operation, OperationResult, SimInstant,
    SystemSnapshot,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    round_scaled: bool,
    growing: bool,
    base_length: u8,
    delay_ms: u16,
    ops: Vec<Operation>,
}

impl Input {
    fn config(&self) -> GameConfig {
        let scoring =
            if self.round_scaled { ScoringRule::RoundScaled } else { ScoringRule::FlatLength };
        let length_schedule =
            if self.growing { LengthSchedule::Growing } else { LengthSchedule::Fixed };

        GameConfig {
            scoring,
            length_schedule,
            base_length: usize::from(self.base_length),
            advance_delay: Duration::from_millis(u64::from(self.delay_ms)),
        }
    }
}

fn apply(game: &mut Game<SimInstant>, now: &mut SimInstant, op: &Operation) -> OperationResult {
    match op {
        Operation::SetName { seat, name } => {
            game.set_player_name(Operation::seat(*seat), name.to_name()).into()
        }
        Operation::Start => game.start().into(),
        Operation::Press { key } => {
            let note = Note::keyboard().nth(Operation::key_index(*key)).unwrap();
            game.submit_note(note, *now);
            OperationResult::Ok
        }
        Operation::SetLength { length } => game.set_required_length(usize::from(*length)).into(),
        Operation::AdvanceTime { millis } => {
            *now = now.after(Duration::from_millis(u64::from(*millis)));
            game.tick(*now);
            OperationResult::Ok
        }
        Operation::EndGame => game.end_game().into(),
        Operation::PlayAgain => game.play_again().into(),
        Operation::ReturnToWelcome => {
            game.return_to_welcome();
            OperationResult::Ok
        }
    }
}

fn observe(game: &Game<SimInstant>) -> ObservableState {
    let snapshot = game.snapshot();
    ObservableState {
        phase: snapshot.phase,
        round: snapshot.round,
        turn: snapshot.turn,
        sequence: snapshot.sequence.iter().map(|n| n.keyboard_index().unwrap()).collect(),
        required_length: snapshot.required_length,
        lives: snapshot.lives,
        guess_len: snapshot.guess_len,
        names: Seat::BOTH.map(|s| snapshot.player(s).name.clone()),
        scores: Seat::BOTH.map(|s| snapshot.player(s).score),
        game_points: Seat::BOTH.map(|s| snapshot.player(s).game_points),
        awaiting_advance: snapshot.awaiting_advance,
    }
}

fuzz_target!(|input: Input| {
    let config = input.config();
    let registry = InvariantRegistry::standard();
    let mut model = ModelGame::new(config.clone());
    let mut game: Game<SimInstant> = Game::new(config);
    let mut now = SimInstant::ZERO;

    for op in &input.ops {
        let before = observe(&game);
        let previous = game.snapshot();

        let expected = model.apply(op);
        let actual = apply(&mut game, &mut now, op);
        assert_eq!(expected, actual, "result diverged on {op:?}");

        let state = observe(&game);
        assert_eq!(model.observable_state(), state, "state diverged on {op:?}");
        if actual.is_err() {
            assert_eq!(before, state, "{op:?} was rejected but mutated state");
        }

        let snapshot = SystemSnapshot::from_game(game.snapshot()).with_previous(previous);
        registry.assert_all(&snapshot, &format!("after {op:?}"));
    }
});
