//! Application state machine.
//!
//! [`App`] owns the [`Game`] and manages everything around it that the
//! player interacts with, completely decoupled from terminals and storage.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Routes keys by screen: name entry, piano keys, end-screen choices.
//! - Translates [`GameAction`]s into sounds, status messages and leaderboard
//!   requests.
//! - Guards ending a game behind a second `Esc`.
//! - Holds the leaderboard view and terminal dimensions for rendering.

use std::{
    ops::Sub,
    time::{Duration, Instant},
};

use jugalbandi_core::{
    FinalScore, Game, GameAction, GameConfig, GameSnapshot, Note, Outcome, Seat, winner,
};

use crate::{
    AppAction, AppEvent, KeyInput, LeaderboardView, Screen, Sound, keymap::note_for_key,
};

/// Application state machine.
///
/// Generic over `Instant` so the round advance can run on virtual time in
/// simulation.
#[derive(Debug, Clone)]
pub struct App<I = Instant>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    game: Game<I>,
    /// Name field being edited on the welcome screen.
    focus: Seat,
    /// First `Esc` pressed during play; the next key decides.
    confirm_end: bool,
    /// Last accepted note, highlighted on the keyboard.
    last_note: Option<Note>,
    /// Results of the game that just ended. `None` outside the end screen.
    final_results: Option<[FinalScore; 2]>,
    leaderboard: LeaderboardView,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl<I> App<I>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    /// Create an App on the welcome screen.
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config),
            focus: Seat::First,
            confirm_end: false,
            last_note: None,
            final_results: None,
            leaderboard: LeaderboardView::Idle,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent, now: I) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => self.tick(now),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::LeaderboardUpdated(standings) => {
                tracing::debug!(players = standings.len(), "leaderboard updated");
                self.leaderboard = LeaderboardView::Ready(standings);
                vec![AppAction::Render]
            },
            AppEvent::LeaderboardUnavailable { message } => {
                tracing::warn!(%message, "leaderboard unavailable");
                self.status_message = Some(format!("Leaderboard unavailable: {message}"));
                self.leaderboard = LeaderboardView::Unavailable(message);
                vec![AppAction::Render]
            },
        }
    }

    /// Advance time. Starts the next round once the post-round delay is
    /// over.
    pub fn tick(&mut self, now: I) -> Vec<AppAction> {
        let actions = self.game.tick(now);
        if actions.is_empty() {
            return vec![];
        }
        self.apply(actions)
    }

    /// Start the game with the entered names.
    pub fn start(&mut self) -> Vec<AppAction> {
        match self.game.start() {
            Ok(actions) => self.apply(actions),
            Err(e) => {
                self.status_message = Some(e.to_string());
                vec![AppAction::Render]
            },
        }
    }

    /// Play a piano key for whoever is acting.
    pub fn play_note(&mut self, note: Note, now: I) -> Vec<AppAction> {
        let actions = self.game.submit_note(note, now);
        self.apply(actions)
    }

    /// Lengthen or shorten the current round's sequence by one note.
    pub fn adjust_length(&mut self, longer: bool) -> Vec<AppAction> {
        let current = self.game.required_length();
        let requested = if longer { current + 1 } else { current.saturating_sub(1) };

        self.status_message = Some(match self.game.set_required_length(requested) {
            Ok(length) => format!("Sequence length: {length} notes"),
            Err(e) => e.to_string(),
        });
        vec![AppAction::Render]
    }

    /// End the game now.
    pub fn end_game(&mut self) -> Vec<AppAction> {
        self.confirm_end = false;
        match self.game.end_game() {
            Ok(actions) => self.apply(actions),
            Err(e) => {
                self.status_message = Some(e.to_string());
                vec![AppAction::Render]
            },
        }
    }

    /// Start another game with the same players.
    pub fn play_again(&mut self) -> Vec<AppAction> {
        match self.game.play_again() {
            Ok(actions) => self.apply(actions),
            Err(e) => {
                self.status_message = Some(e.to_string());
                vec![AppAction::Render]
            },
        }
    }

    /// Back to name entry with everything cleared.
    pub fn return_to_welcome(&mut self) -> Vec<AppAction> {
        let actions = self.game.return_to_welcome();
        self.apply(actions)
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn handle_key(&mut self, key: KeyInput, now: I) -> Vec<AppAction> {
        match self.screen() {
            Screen::Welcome => self.handle_welcome_key(key),
            Screen::Play => self.handle_play_key(key, now),
            Screen::End => self.handle_end_key(key),
        }
    }

    fn handle_welcome_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Tab | KeyInput::BackTab => {
                self.focus = self.focus.other();
                vec![AppAction::Render]
            },
            KeyInput::Char(c) => {
                let mut name = self.game.player(self.focus).name.clone();
                name.push(c);
                self.set_focused_name(name)
            },
            KeyInput::Backspace => {
                let mut name = self.game.player(self.focus).name.clone();
                name.pop();
                self.set_focused_name(name)
            },
            KeyInput::Enter => self.start(),
            KeyInput::Esc => self.quit(),
        }
    }

    fn set_focused_name(&mut self, name: String) -> Vec<AppAction> {
        match self.game.set_player_name(self.focus, name) {
            Ok(()) => self.status_message = None,
            Err(e) => self.status_message = Some(e.to_string()),
        }
        vec![AppAction::Render]
    }

    fn handle_play_key(&mut self, key: KeyInput, now: I) -> Vec<AppAction> {
        if self.confirm_end {
            if key == KeyInput::Esc {
                return self.end_game();
            }
            self.confirm_end = false;
            self.status_message = None;
            return vec![AppAction::Render];
        }

        match key {
            KeyInput::Esc => {
                self.confirm_end = true;
                self.status_message = Some(
                    "End the game? Press Esc again to confirm, any other key to continue".into(),
                );
                vec![AppAction::Render]
            },
            KeyInput::Char('+' | '=') => self.adjust_length(true),
            KeyInput::Char('-' | '_') => self.adjust_length(false),
            KeyInput::Char(c) => match note_for_key(c) {
                Some(note) => self.play_note(note, now),
                None => vec![],
            },
            KeyInput::Enter | KeyInput::Backspace | KeyInput::Tab | KeyInput::BackTab => vec![],
        }
    }

    fn handle_end_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Enter | KeyInput::Char('r' | 'R') => self.play_again(),
            KeyInput::Char('w' | 'W') => self.return_to_welcome(),
            KeyInput::Esc | KeyInput::Char('q' | 'Q') => self.quit(),
            KeyInput::Char(_) | KeyInput::Backspace | KeyInput::Tab | KeyInput::BackTab => vec![],
        }
    }

    /// Translate game actions into app actions. Always ends with a render.
    fn apply(&mut self, actions: Vec<GameAction>) -> Vec<AppAction> {
        let mut out = Vec::new();

        for action in actions {
            match action {
                GameAction::PlayNote { note, .. } => {
                    self.last_note = Some(note);
                    out.push(AppAction::Play(Sound::Note(note)));
                },
                GameAction::GuessStarted { guesser, length } => {
                    let name = &self.game.player(guesser).name;
                    self.status_message =
                        Some(format!("{name}, repeat the {length}-note sequence"));
                },
                GameAction::LifeLost { lives_remaining, .. } => {
                    if lives_remaining > 0 {
                        let lives = if lives_remaining == 1 { "life" } else { "lives" };
                        self.status_message = Some(format!(
                            "Wrong note! {lives_remaining} {lives} left, start from the first note"
                        ));
                    }
                },
                GameAction::RoundResolved(result) => {
                    let points = result.points;
                    let (message, sound) = match result.outcome {
                        Outcome::GuesserWon => {
                            (format!("Great job! +{points} points!"), Sound::Success)
                        },
                        Outcome::CreatorWon => {
                            let name = &self.game.player(result.awarded_to).name;
                            (format!("Nice try! {name} gets {points} points!"), Sound::Failure)
                        },
                    };
                    self.confirm_end = false;
                    self.status_message = Some(message);
                    out.push(AppAction::Play(sound));
                },
                GameAction::RoundStarted { round, creator, required_length } => {
                    // The new prompt replaces any pending end confirmation
                    self.confirm_end = false;
                    let name = &self.game.player(creator).name;
                    self.status_message = Some(format!(
                        "Round {round}: {name}, create a sequence of {required_length} notes"
                    ));
                    self.last_note = None;
                    self.final_results = None;
                },
                GameAction::GameEnded { results } => {
                    self.status_message = Some(match winner(&results) {
                        Some(best) => format!("{} wins with {} points!", best.name, best.score),
                        None => "It's a tie!".to_string(),
                    });
                    self.final_results = Some(results.clone());
                    self.leaderboard = LeaderboardView::Loading;
                    out.push(AppAction::SubmitScores { results });
                    out.push(AppAction::FetchLeaderboard);
                },
                GameAction::ReturnedToWelcome => {
                    self.focus = Seat::First;
                    self.confirm_end = false;
                    self.last_note = None;
                    self.final_results = None;
                    self.status_message = None;
                },
            }
        }

        out.push(AppAction::Render);
        out
    }

    /// Screen for the current phase.
    pub fn screen(&self) -> Screen {
        Screen::from(self.game.phase())
    }

    /// The game being played.
    pub fn game(&self) -> &Game<I> {
        &self.game
    }

    /// Read-only view of the game for rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    /// Name field with focus on the welcome screen.
    pub fn focus(&self) -> Seat {
        self.focus
    }

    /// Waiting for a second `Esc` to end the game.
    pub fn is_confirming_end(&self) -> bool {
        self.confirm_end
    }

    /// Last accepted note. `None` at the start of a round.
    pub fn last_note(&self) -> Option<Note> {
        self.last_note
    }

    /// Results of the game that just ended. `None` outside the end screen.
    pub fn final_results(&self) -> Option<&[FinalScore; 2]> {
        self.final_results.as_ref()
    }

    /// Leaderboard view.
    pub fn leaderboard(&self) -> &LeaderboardView {
        &self.leaderboard
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
