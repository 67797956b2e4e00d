//! Play screen header and prompt
//!
//! Header shows the round and both scores with the acting player
//! highlighted. The prompt says who acts and how far along they are.

use jugalbandi_core::{GamePhase, GameSnapshot, MAX_LIVES, Seat};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const LIFE: &str = "♥";
const LOST_LIFE: &str = "♡";
const FILLED: &str = "● ";
const EMPTY: &str = "○ ";

/// Render the round and score header.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();

    let round = format!(" Round {} ", snapshot.round);
    let mut spans =
        vec![Span::styled(round, Style::default().add_modifier(Modifier::BOLD)), Span::raw("  ")];

    for seat in Seat::BOTH {
        let player = snapshot.player(seat);
        let style = if snapshot.turn == seat {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {}: {} ", player.name, player.score), style));
        spans.push(Span::raw(" "));
    }

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Render the turn prompt, lives and progress.
pub fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let acting = &snapshot.player(snapshot.turn).name;
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::default()];

    match snapshot.phase {
        GamePhase::Create => {
            let entered = snapshot.sequence.len();
            let required = snapshot.required_length;
            lines.push(Line::from(Span::styled(format!("{acting}'s turn to create"), heading)));
            lines.push(Line::from(format!("Play {required} notes ({entered}/{required})")));
            lines.push(progress(entered, required));
            if app.game().can_edit_length() {
                lines.push(hint("+/- change the sequence length"));
            }
        },
        GamePhase::Guess => {
            let matched = snapshot.guess_len;
            let required = snapshot.sequence.len();
            lines.push(Line::from(Span::styled(format!("{acting}'s turn to guess"), heading)));
            lines.push(Line::from(format!("Reproduce the sequence ({matched}/{required})")));
            lines.push(progress(matched, required));
            lines.push(lives(&snapshot));
            if snapshot.awaiting_advance {
                lines.push(hint(&format!("Round {} is coming up...", snapshot.round + 1)));
            }
        },
        GamePhase::Welcome | GamePhase::End => {},
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn progress(done: usize, total: usize) -> Line<'static> {
    let done_style = Style::default().fg(Color::Green);
    let spans: Vec<Span> = (0..total)
        .map(|i| if i < done { Span::styled(FILLED, done_style) } else { Span::raw(EMPTY) })
        .collect();
    Line::from(spans)
}

fn lives(snapshot: &GameSnapshot) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("Lives: {} ", snapshot.lives))];
    for i in 0..MAX_LIVES {
        if i < snapshot.lives {
            spans.push(Span::styled(LIFE, Style::default().fg(Color::Red)));
        } else {
            spans.push(Span::styled(LOST_LIFE, Style::default().fg(Color::DarkGray)));
        }
    }
    Line::from(spans)
}

fn hint(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)))
}
