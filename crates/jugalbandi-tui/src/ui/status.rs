//! Status bar
//!
//! Shows the latest status message, or the key hints for the current
//! screen when there is none.

use jugalbandi_app::Screen;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.status_message() {
        Some(message) if app.is_confirming_end() => Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Some(message) => {
            Span::styled(message.to_string(), Style::default().add_modifier(Modifier::BOLD))
        },
        None => Span::styled(default_hint(app.screen()), Style::default().fg(Color::Gray)),
    };

    let line = Line::from(vec![Span::raw(" "), content]);
    let paragraph =
        Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn default_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Welcome => "Enter both names to begin",
        Screen::Play => "Play with Z-M and Q-U rows | Esc end game",
        Screen::End => "Enter play again | W welcome | Q quit",
    }
}
