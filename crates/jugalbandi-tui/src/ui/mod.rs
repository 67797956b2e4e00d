//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod board;
mod keyboard;
mod scoreboard;
mod status;
mod welcome;

use jugalbandi_app::Screen;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const STATUS_HEIGHT: u16 = 1;
    const SCREEN_MIN_HEIGHT: u16 = 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(SCREEN_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [screen_area, status_area] = chunks.as_ref() else {
        return;
    };

    match app.screen() {
        Screen::Welcome => welcome::render(frame, app, *screen_area),
        Screen::Play => render_play(frame, app, *screen_area),
        Screen::End => scoreboard::render(frame, app, *screen_area),
    }
    status::render(frame, app, *status_area);
}

/// Render the play screen (header, prompt, keyboard).
fn render_play(frame: &mut Frame, app: &App, area: Rect) {
    const HEADER_HEIGHT: u16 = 3;
    const PROMPT_MIN_HEIGHT: u16 = 6;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(PROMPT_MIN_HEIGHT),
            Constraint::Length(keyboard::HEIGHT),
        ])
        .split(area);

    let [header_area, prompt_area, keyboard_area] = chunks.as_ref() else {
        return;
    };

    board::render_header(frame, app, *header_area);
    board::render_prompt(frame, app, *prompt_area);
    keyboard::render(frame, app, *keyboard_area);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use jugalbandi_app::{AppEvent, KeyInput};
    use jugalbandi_core::{GameConfig, Standing};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    fn send(app: &mut App, keys: &str) {
        for c in keys.chars() {
            app.handle(AppEvent::Key(KeyInput::Char(c)), Instant::now());
        }
    }

    fn started() -> App {
        let mut app = App::new(GameConfig::default());
        send(&mut app, "Asha");
        app.handle(AppEvent::Key(KeyInput::Tab), Instant::now());
        send(&mut app, "Bo");
        app.handle(AppEvent::Key(KeyInput::Enter), Instant::now());
        app
    }

    #[test]
    fn welcome_shows_name_fields() {
        let mut app = App::new(GameConfig::default());
        send(&mut app, "Asha");
        let screen = draw(&app);

        assert!(screen.contains("Piano Jugalbandi"));
        assert!(screen.contains("Asha"));
        assert!(screen.contains("Player 2"));
    }

    #[test]
    fn play_shows_round_scores_and_keyboard() {
        let app = started();
        let screen = draw(&app);

        assert!(screen.contains("Round 1"));
        assert!(screen.contains("Asha: 0"));
        assert!(screen.contains("Asha's turn to create"));
        assert!(screen.contains("C#4"));
    }

    #[test]
    fn guess_phase_shows_lives_and_progress() {
        let mut app = started();
        send(&mut app, "zxcz");
        let screen = draw(&app);

        assert!(screen.contains("Bo's turn to guess"));
        assert!(screen.contains("(1/3)"));
        assert!(screen.contains("Lives: 3"));
    }

    #[test]
    fn end_screen_shows_results_and_leaderboard() {
        let mut app = started();
        app.end_game();
        app.handle(
            AppEvent::LeaderboardUpdated(vec![Standing::new("Chandra", 900)]),
            Instant::now(),
        );
        let screen = draw(&app);

        assert!(screen.contains("Game Over"));
        assert!(screen.contains("It's a tie!"));
        assert!(screen.contains("Chandra"));
        assert!(screen.contains("900.0"));
    }
}
