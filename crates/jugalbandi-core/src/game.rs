//! Turn-based sequence game state machine.
//!
//! Tracks rounds, roles, the creator's sequence, the guesser's attempt, lives
//! and scores. Uses the action pattern: transitions take time as input where
//! they need it and return [`GameAction`]s for the caller to execute. No I/O,
//! no clocks, no timers of its own.
//!
//! # State Machine
//!
//! ```text
//!               start                 sequence full
//! ┌─────────┐ ───────> ┌────────┐ ─────────────────> ┌───────┐
//! │ Welcome │          │ Create │                    │ Guess │
//! └─────────┘ <──┐     └────────┘ <───────────────── └───────┘
//!      ^         │        │  ^      tick after delay      │
//!      │ welcome │   end  │  │ play again            end  │
//!      │         │        v  │                            │
//!      │         │     ┌─────┐                            │
//!      └─────────┴──── │ End │ <──────────────────────────┘
//!                      └─────┘
//! ```
//!
//! A guess phase resolves when the guesser completes the sequence or runs
//! out of lives. Points are awarded immediately; the move to the next round
//! is scheduled and fires from [`Game::tick`] once the configured delay has
//! elapsed. Ending or resetting the game drops the scheduled advance.

use std::{
    fmt,
    ops::Sub,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{
    FinalScore, GameAction, GameConfig, GameError, GameSnapshot, Note, Outcome, Player,
    RoundResult, Seat,
    rules::{MAX_LIVES, clamp_length, creator_for_round, is_correct_prefix},
};

/// Game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Players are entering their names.
    Welcome,
    /// The creator is building the sequence.
    Create,
    /// The guesser is reproducing the sequence.
    Guess,
    /// The game was ended on request.
    End,
}

impl GamePhase {
    /// Phases in which notes can change state.
    pub fn is_in_game(self) -> bool {
        matches!(self, Self::Create | Self::Guess)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Welcome => "welcome",
            Self::Create => "create",
            Self::Guess => "guess",
            Self::End => "end",
        };
        f.write_str(name)
    }
}

/// Scheduled move from a resolved guess phase to the next round.
#[derive(Debug, Clone, Copy)]
struct PendingAdvance<I> {
    resolved_at: I,
    result: RoundResult,
}

/// Game state machine.
///
/// Generic over `Instant` so simulation can drive the round advance with
/// virtual time.
#[derive(Debug, Clone)]
pub struct Game<I = Instant>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    config: GameConfig,
    players: [Player; 2],
    round: u32,
    turn: Seat,
    phase: GamePhase,
    sequence: Vec<Note>,
    required_length: usize,
    lives: u8,
    /// Guesser's partial attempt. Always a correct prefix of `sequence`.
    guess: Vec<Note>,
    pending: Option<PendingAdvance<I>>,
}

impl<I> Game<I>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    /// Create a game in [`GamePhase::Welcome`].
    pub fn new(config: GameConfig) -> Self {
        let required_length = config.length_for_round(1);
        Self {
            config,
            players: [Player::default(), Player::default()],
            round: 1,
            turn: creator_for_round(1),
            phase: GamePhase::Welcome,
            sequence: Vec::new(),
            required_length,
            lives: MAX_LIVES,
            guess: Vec::new(),
            pending: None,
        }
    }

    /// Set a player's name.
    ///
    /// # Errors
    ///
    /// - `GameError::NamesLocked` outside the welcome phase
    pub fn set_player_name(
        &mut self,
        seat: Seat,
        name: impl Into<String>,
    ) -> Result<(), GameError> {
        if self.phase != GamePhase::Welcome {
            return Err(GameError::NamesLocked);
        }
        self.players[seat.index()].name = name.into();
        Ok(())
    }

    /// Both names are filled in.
    pub fn can_start(&self) -> bool {
        self.phase == GamePhase::Welcome && self.players.iter().all(|p| !p.has_blank_name())
    }

    /// Start a brand-new game: round 1, first seat creates, scores cleared.
    ///
    /// # Errors
    ///
    /// - `GameError::InvalidState` outside the welcome phase
    /// - `GameError::BlankName` if either name is blank
    pub fn start(&mut self) -> Result<Vec<GameAction>, GameError> {
        self.require_phase(GamePhase::Welcome, "start the game")?;

        let blank = Seat::BOTH.into_iter().find(|s| self.players[s.index()].has_blank_name());
        if let Some(seat) = blank {
            return Err(GameError::BlankName { seat });
        }

        for player in &mut self.players {
            player.name = player.name.trim().to_string();
            player.score = 0;
            player.game_points = 0;
        }

        tracing::info!(
            first = %self.players[0].name,
            second = %self.players[1].name,
            "game started"
        );

        Ok(vec![self.begin_round(1)])
    }

    /// Override the current round's sequence length.
    ///
    /// Out-of-range requests are clamped to `[3, 50]`. The value applies to
    /// this round only. Returns the length now in effect.
    ///
    /// # Errors
    ///
    /// - `GameError::InvalidState` outside the create phase
    /// - `GameError::LengthLocked` once the creator has entered a note
    pub fn set_required_length(&mut self, requested: usize) -> Result<usize, GameError> {
        self.require_phase(GamePhase::Create, "change the sequence length")?;
        if !self.sequence.is_empty() {
            return Err(GameError::LengthLocked);
        }

        self.required_length = clamp_length(requested);
        tracing::debug!(requested, length = self.required_length, "sequence length set");
        Ok(self.required_length)
    }

    /// Submit a note from the acting player.
    ///
    /// Notes outside the create and guess phases, notes past a full
    /// sequence, and notes after a guess has resolved are ignored.
    pub fn submit_note(&mut self, note: Note, now: I) -> Vec<GameAction> {
        match self.phase {
            GamePhase::Create => self.create_note(note),
            GamePhase::Guess => self.guess_note(note, now),
            GamePhase::Welcome | GamePhase::End => {
                tracing::trace!(%note, phase = %self.phase, "note ignored");
                vec![]
            },
        }
    }

    /// Process periodic time.
    ///
    /// Starts the next round once a resolved guess has waited out the
    /// configured delay.
    pub fn tick(&mut self, now: I) -> Vec<GameAction> {
        if self.advance_due_in(now) != Some(Duration::ZERO) {
            return vec![];
        }

        self.pending = None;
        let next = self.round.saturating_add(1);
        vec![self.begin_round(next)]
    }

    /// Time left before the scheduled round advance. `None` if nothing is
    /// scheduled.
    pub fn advance_due_in(&self, now: I) -> Option<Duration> {
        let pending = self.pending.as_ref()?;
        debug_assert_eq!(self.phase, GamePhase::Guess);

        let elapsed = now - pending.resolved_at;
        Some(self.config.advance_delay.saturating_sub(elapsed))
    }

    /// End the game. Cancels any scheduled round advance.
    ///
    /// # Errors
    ///
    /// - `GameError::InvalidState` unless in the create or guess phase
    pub fn end_game(&mut self) -> Result<Vec<GameAction>, GameError> {
        if !self.phase.is_in_game() {
            return Err(GameError::InvalidState { phase: self.phase, operation: "end the game" });
        }

        self.pending = None;
        self.guess.clear();
        self.phase = GamePhase::End;

        let results = self.final_scores();
        tracing::info!(
            round = self.round,
            first = results[0].score,
            second = results[1].score,
            "game ended"
        );

        Ok(vec![GameAction::GameEnded { results }])
    }

    /// Start over from round 1 with the same players. Scores are kept;
    /// per-game points restart at zero.
    ///
    /// # Errors
    ///
    /// - `GameError::InvalidState` outside the end phase
    pub fn play_again(&mut self) -> Result<Vec<GameAction>, GameError> {
        self.require_phase(GamePhase::End, "play again")?;

        self.pending = None;
        for player in &mut self.players {
            player.game_points = 0;
        }

        tracing::info!("playing again");
        Ok(vec![self.begin_round(1)])
    }

    /// Reset everything, names and scores included.
    pub fn return_to_welcome(&mut self) -> Vec<GameAction> {
        *self = Self::new(self.config.clone());
        tracing::info!("returned to welcome");
        vec![GameAction::ReturnedToWelcome]
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            round: self.round,
            turn: self.turn,
            phase: self.phase,
            sequence: self.sequence.clone(),
            required_length: self.required_length,
            lives: self.lives,
            guess_len: self.guess.len(),
            awaiting_advance: self.pending.is_some(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Current round (starts at 1).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Seat currently acting.
    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// Seat that creates the sequence this round.
    pub fn creator(&self) -> Seat {
        creator_for_round(self.round)
    }

    /// Both players, indexed by seat.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Player in `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Sequence for the current round.
    pub fn sequence(&self) -> &[Note] {
        &self.sequence
    }

    /// Notes the creator must enter this round.
    pub fn required_length(&self) -> usize {
        self.required_length
    }

    /// Lives left in the current guess phase.
    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Guesser's partial attempt.
    pub fn guess(&self) -> &[Note] {
        &self.guess
    }

    /// Result of the resolved round waiting to advance. `None` if nothing is
    /// scheduled.
    pub fn pending_result(&self) -> Option<RoundResult> {
        self.pending.as_ref().map(|p| p.result)
    }

    /// The round length can still be changed.
    pub fn can_edit_length(&self) -> bool {
        self.phase == GamePhase::Create && self.sequence.is_empty()
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn require_phase(&self, phase: GamePhase, operation: &'static str) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidState { phase: self.phase, operation })
        }
    }

    fn begin_round(&mut self, round: u32) -> GameAction {
        self.round = round;
        self.sequence.clear();
        self.guess.clear();
        self.lives = MAX_LIVES;
        self.turn = creator_for_round(round);
        self.required_length = self.config.length_for_round(round);
        self.phase = GamePhase::Create;

        tracing::debug!(
            round,
            creator = %self.turn,
            length = self.required_length,
            "round started"
        );

        GameAction::RoundStarted {
            round,
            creator: self.turn,
            required_length: self.required_length,
        }
    }

    fn create_note(&mut self, note: Note) -> Vec<GameAction> {
        if self.sequence.len() >= self.required_length {
            return vec![];
        }

        self.sequence.push(note);
        let mut actions = vec![GameAction::PlayNote { seat: self.turn, note }];

        if self.sequence.len() == self.required_length {
            self.turn = self.turn.other();
            self.lives = MAX_LIVES;
            self.guess.clear();
            self.phase = GamePhase::Guess;

            tracing::debug!(round = self.round, guesser = %self.turn, "sequence frozen");
            actions.push(GameAction::GuessStarted {
                guesser: self.turn,
                length: self.sequence.len(),
            });
        }

        actions
    }

    fn guess_note(&mut self, note: Note, now: I) -> Vec<GameAction> {
        if self.pending.is_some() {
            return vec![];
        }
        debug_assert!(self.guess.len() < self.sequence.len());
        debug_assert_eq!(self.turn, self.creator().other());

        let mut actions = vec![GameAction::PlayNote { seat: self.turn, note }];

        self.guess.push(note);
        if is_correct_prefix(&self.sequence, &self.guess) {
            if self.guess.len() == self.sequence.len() {
                actions.push(self.resolve(Outcome::GuesserWon, now));
            }
            return actions;
        }

        self.guess.clear();
        self.lives = self.lives.saturating_sub(1);
        tracing::debug!(round = self.round, lives = self.lives, "wrong note");
        actions.push(GameAction::LifeLost { seat: self.turn, lives_remaining: self.lives });

        if self.lives == 0 {
            actions.push(self.resolve(Outcome::CreatorWon, now));
        }
        actions
    }

    fn resolve(&mut self, outcome: Outcome, now: I) -> GameAction {
        let awarded_to = match outcome {
            Outcome::GuesserWon => self.turn,
            Outcome::CreatorWon => self.turn.other(),
        };
        let points = self.config.scoring.points(outcome, self.round, self.required_length);
        self.players[awarded_to.index()].award(points);

        let result = RoundResult { round: self.round, outcome, awarded_to, points };
        self.pending = Some(PendingAdvance { resolved_at: now, result });

        tracing::info!(
            round = self.round,
            ?outcome,
            winner = %awarded_to,
            points,
            "round resolved"
        );
        GameAction::RoundResolved(result)
    }

    fn final_scores(&self) -> [FinalScore; 2] {
        Seat::BOTH.map(|seat| {
            let player = &self.players[seat.index()];
            FinalScore {
                seat,
                name: player.name.clone(),
                game_points: player.game_points,
                score: player.score,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(name: &str) -> Note {
        name.parse().unwrap()
    }

    fn started() -> (Game, Instant) {
        let mut game = Game::new(GameConfig::default());
        game.set_player_name(Seat::First, "A").unwrap();
        game.set_player_name(Seat::Second, "B").unwrap();
        game.start().unwrap();
        (game, Instant::now())
    }

    fn play(game: &mut Game, now: Instant, names: &[&str]) -> Vec<GameAction> {
        names.iter().flat_map(|n| game.submit_note(note(n), now)).collect()
    }

    #[test]
    fn start_requires_both_names() {
        let mut game: Game = Game::new(GameConfig::default());
        game.set_player_name(Seat::First, "A").unwrap();
        game.set_player_name(Seat::Second, "   ").unwrap();

        assert!(!game.can_start());
        assert_eq!(game.start(), Err(GameError::BlankName { seat: Seat::Second }));
        assert_eq!(game.phase(), GamePhase::Welcome);
    }

    #[test]
    fn start_trims_names() {
        let mut game: Game = Game::new(GameConfig::default());
        game.set_player_name(Seat::First, "  Asha ").unwrap();
        game.set_player_name(Seat::Second, "Bo").unwrap();
        game.start().unwrap();
        assert_eq!(game.player(Seat::First).name, "Asha");
    }

    #[test]
    fn names_lock_after_start() {
        let (mut game, _) = started();
        assert_eq!(game.set_player_name(Seat::First, "Z"), Err(GameError::NamesLocked));
    }

    #[test]
    fn filling_sequence_hands_turn_to_guesser() {
        let (mut game, now) = started();
        assert_eq!(game.turn(), Seat::First);

        let actions = play(&mut game, now, &["C4", "E4", "G4"]);

        assert_eq!(game.phase(), GamePhase::Guess);
        assert_eq!(game.turn(), Seat::Second);
        assert_eq!(game.lives(), MAX_LIVES);
        assert!(actions.contains(&GameAction::GuessStarted { guesser: Seat::Second, length: 3 }));
    }

    #[test]
    fn wrong_note_costs_a_life_and_restarts_attempt() {
        let (mut game, now) = started();
        play(&mut game, now, &["C4", "E4", "G4"]);

        let actions = play(&mut game, now, &["C4", "E4", "A4"]);

        assert_eq!(game.lives(), 2);
        assert!(game.guess().is_empty());
        assert_eq!(game.sequence(), &[note("C4"), note("E4"), note("G4")]);
        assert_eq!(game.phase(), GamePhase::Guess);
        assert!(actions.contains(&GameAction::LifeLost { seat: Seat::Second, lives_remaining: 2 }));
    }

    #[test]
    fn correct_guess_awards_guesser_and_schedules_advance() {
        let (mut game, now) = started();
        play(&mut game, now, &["C4", "E4", "G4"]);
        let actions = play(&mut game, now, &["C4", "E4", "G4"]);

        let expected = RoundResult {
            round: 1,
            outcome: Outcome::GuesserWon,
            awarded_to: Seat::Second,
            points: 300,
        };
        assert!(actions.contains(&GameAction::RoundResolved(expected)));
        assert_eq!(game.player(Seat::Second).score, 300);
        assert_eq!(game.pending_result(), Some(expected));

        // Input is inert until the advance fires
        assert!(game.submit_note(note("C4"), now).is_empty());
        assert!(game.tick(now + Duration::from_millis(1999)).is_empty());

        let actions = game.tick(now + Duration::from_millis(2000));
        assert_eq!(actions, vec![GameAction::RoundStarted {
            round: 2,
            creator: Seat::Second,
            required_length: 3
        }]);
        assert_eq!(game.phase(), GamePhase::Create);
        assert_eq!(game.turn(), Seat::Second);
        assert!(game.sequence().is_empty());
    }

    #[test]
    fn exhausting_lives_awards_creator() {
        let (mut game, now) = started();
        play(&mut game, now, &["C4", "E4", "G4"]);
        play(&mut game, now, &["D4", "D4", "D4"]);

        assert_eq!(game.lives(), 0);
        assert_eq!(game.player(Seat::First).score, 300);
        assert_eq!(game.player(Seat::Second).score, 0);
        assert_eq!(game.pending_result().map(|r| r.outcome), Some(Outcome::CreatorWon));

        game.tick(now + Duration::from_secs(5));
        assert_eq!(game.round(), 2);
        assert_eq!(game.lives(), MAX_LIVES);
    }

    #[test]
    fn length_locks_after_first_note() {
        let (mut game, now) = started();
        game.set_required_length(4).unwrap();
        play(&mut game, now, &["C4", "C4", "C4"]);
        assert_eq!(game.set_required_length(10), Err(GameError::LengthLocked));
        assert_eq!(game.required_length(), 4);
    }

    #[test]
    fn length_requests_are_clamped() {
        let (mut game, _) = started();
        assert_eq!(game.set_required_length(100), Ok(50));
        assert_eq!(game.set_required_length(0), Ok(3));
    }

    #[test]
    fn length_override_lasts_one_round() {
        let (mut game, now) = started();
        game.set_required_length(5).unwrap();
        play(&mut game, now, &["C4"; 5]);
        play(&mut game, now, &["C4"; 5]);
        game.tick(now + Duration::from_secs(3));

        assert_eq!(game.round(), 2);
        assert_eq!(game.required_length(), 3);
    }

    #[test]
    fn end_game_cancels_pending_advance() {
        let (mut game, now) = started();
        play(&mut game, now, &["C4", "E4", "G4"]);
        play(&mut game, now, &["C4", "E4", "G4"]);

        game.end_game().unwrap();
        assert!(game.tick(now + Duration::from_secs(10)).is_empty());
        assert_eq!(game.phase(), GamePhase::End);
        assert_eq!(game.round(), 1);
        assert!(play(&mut game, now, &["C4"]).is_empty());
    }

    #[test]
    fn end_game_outside_play_is_rejected() {
        let mut game: Game = Game::new(GameConfig::default());
        assert!(matches!(game.end_game(), Err(GameError::InvalidState { .. })));
    }

    #[test]
    fn play_again_keeps_scores_and_restarts_rounds() {
        let (mut game, now) = started();
        play(&mut game, now, &["C4", "E4", "G4"]);
        play(&mut game, now, &["C4", "E4", "G4"]);
        game.tick(now + Duration::from_secs(2));
        game.end_game().unwrap();

        game.play_again().unwrap();

        assert_eq!(game.phase(), GamePhase::Create);
        assert_eq!(game.round(), 1);
        assert_eq!(game.turn(), Seat::First);
        assert_eq!(game.player(Seat::Second).score, 300);
        assert_eq!(game.player(Seat::Second).game_points, 0);
    }

    #[test]
    fn return_to_welcome_clears_everything() {
        let (mut game, now) = started();
        play(&mut game, now, &["C4", "E4", "G4"]);
        play(&mut game, now, &["C4", "E4", "G4"]);

        game.return_to_welcome();

        assert_eq!(game.phase(), GamePhase::Welcome);
        assert!(game.players().iter().all(|p| p.name.is_empty() && p.score == 0));
        assert!(game.tick(now + Duration::from_secs(10)).is_empty());
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn notes_before_start_are_ignored() {
        let mut game: Game = Game::new(GameConfig::default());
        assert!(game.submit_note(note("C4"), Instant::now()).is_empty());
        assert!(game.sequence().is_empty());
    }
}
