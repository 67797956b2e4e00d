//! Welcome screen
//!
//! Name entry for both players.

use jugalbandi_core::Seat;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const CURSOR: &str = "_";

/// Render the welcome screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("Piano Jugalbandi", title_style)),
        Line::from("A two-player memory duel on the keyboard"),
        Line::default(),
    ];

    for seat in Seat::BOTH {
        lines.push(name_field(app, seat));
    }

    lines.extend([
        Line::default(),
        Line::from(Span::styled(
            "Tab switch player | Enter start | Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let block = Block::default().borders(Borders::ALL).title(" Welcome ");
    let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn name_field(app: &App, seat: Seat) -> Line<'static> {
    let focused = app.focus() == seat;
    let name = app.game().player(seat).name.clone();

    let label = format!("Player {}: ", seat.index() + 1);
    let (marker, style) = if focused {
        ("> ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default())
    };

    let mut spans = vec![Span::raw(marker), Span::styled(label, style), Span::styled(name, style)];
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    Line::from(spans)
}
