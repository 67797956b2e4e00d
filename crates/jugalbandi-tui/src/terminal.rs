//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Round outcomes ring the
//! terminal bell; played notes show up as a highlighted key.

use std::{
    io::{self, Stdout, Write, stdout},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use jugalbandi_app::{App, AppEvent, Driver, KeyInput, Sound};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui;

/// How long `poll_event` waits for input before returning so the runtime
/// can tick.
const TICK_RATE: Duration = Duration::from_millis(50);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal for its lifetime: raw mode and the alternate screen
/// are entered on creation and restored on [`Driver::stop`] or drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Io` if raw mode or the alternate screen
    /// cannot be entered.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        Ok(Self { terminal, event_stream: EventStream::new(), restored: false })
    }

    /// Convert a crossterm key event to `KeyInput`.
    ///
    /// Ctrl+C maps to `Esc` so it behaves like the regular way out.
    fn convert_key(event: KeyEvent) -> Option<KeyInput> {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return (event.code == KeyCode::Char('c')).then_some(KeyInput::Esc);
        }

        match event.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::BackTab => Some(KeyInput::BackTab),
            KeyCode::Esc => Some(KeyInput::Esc),
            _ => None,
        }
    }

    fn ring_bell() {
        let mut out = stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|()| out.flush()) {
            tracing::debug!(error = %e, "terminal bell failed");
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        tokio::select! {
            biased;

            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key_event).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            () = tokio::time::sleep(TICK_RATE) => Ok(None),
        }
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn play(&mut self, sound: Sound) {
        match sound {
            Sound::Success | Sound::Failure => Self::ring_bell(),
            Sound::Note(note) => tracing::trace!(%note, "note played"),
        }
    }

    fn stop(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let _ = self.terminal.show_cursor();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn converts_game_keys() {
        let convert = TerminalDriver::convert_key;
        let none = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;

        assert_eq!(convert(key(KeyCode::Char('z'), none)), Some(KeyInput::Char('z')));
        assert_eq!(convert(key(KeyCode::Char('S'), shift)), Some(KeyInput::Char('S')));
        assert_eq!(convert(key(KeyCode::BackTab, shift)), Some(KeyInput::BackTab));
        assert_eq!(convert(key(KeyCode::Left, none)), None);
    }

    #[test]
    fn ctrl_c_acts_as_escape() {
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(TerminalDriver::convert_key(key(KeyCode::Char('c'), ctrl)), Some(KeyInput::Esc));
        assert_eq!(TerminalDriver::convert_key(key(KeyCode::Char('z'), ctrl)), None);
    }
}
