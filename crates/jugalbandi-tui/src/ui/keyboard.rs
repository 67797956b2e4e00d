//! Piano keyboard
//!
//! Two octaves, higher octave on top. Each key shows the computer key that
//! plays it and the note name; the last played note is highlighted.

use jugalbandi_app::keymap::key_for_note;
use jugalbandi_core::{HIGHEST_OCTAVE, LOWEST_OCTAVE, Note, PitchClass};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

/// Rows needed: two lines per octave, a spacer, and the border.
pub const HEIGHT: u16 = 7;

const CELL_WIDTH: usize = 5;

/// Render the keyboard.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let last = app.last_note();
    let mut lines = Vec::new();

    for octave in (LOWEST_OCTAVE..=HIGHEST_OCTAVE).rev() {
        let notes: Vec<Note> = PitchClass::ALL.iter().map(|&p| Note::new(p, octave)).collect();

        let keys = notes
            .iter()
            .map(|&note| {
                let label = key_for_note(note).map_or(' ', |c| c.to_ascii_uppercase());
                Span::styled(format!("{label:^CELL_WIDTH$}"), key_style(note, last))
            })
            .collect::<Vec<_>>();
        let names = notes
            .iter()
            .map(|&note| {
                Span::styled(format!("{:^CELL_WIDTH$}", note.to_string()), key_style(note, last))
            })
            .collect::<Vec<_>>();

        lines.push(Line::from(keys));
        lines.push(Line::from(names));
        if octave > LOWEST_OCTAVE {
            lines.push(Line::default());
        }
    }

    let block = Block::default().borders(Borders::ALL).title(" Keyboard ");
    frame.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Center), area);
}

fn key_style(note: Note, last: Option<Note>) -> Style {
    if last == Some(note) {
        return Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    if note.pitch.is_sharp() {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Black).bg(Color::White)
    }
}
