//! End screen
//!
//! Final scores of the game that just ended and the leaderboard.

use jugalbandi_app::LeaderboardView;
use jugalbandi_core::winner;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::App;

const RESULTS_HEIGHT: u16 = 8;
const NAME_WIDTH: usize = 20;

/// Render the end screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(RESULTS_HEIGHT), Constraint::Min(3)])
        .split(area);

    let [results_area, leaderboard_area] = chunks.as_ref() else {
        return;
    };

    render_results(frame, app, *results_area);
    render_leaderboard(frame, app, *leaderboard_area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    if let Some(results) = app.final_results() {
        let best = winner(results).map(|w| w.seat);
        for result in results {
            let style = if best == Some(result.seat) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{:<NAME_WIDTH$} {:>6} points  (+{} this game)",
                    result.name, result.score, result.game_points
                ),
                style,
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(match winner(results) {
            Some(w) => format!("{} wins!", w.name),
            None => "It's a tie!".to_string(),
        }));
    }

    let block = Block::default().borders(Borders::ALL).title(" Game Over ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_leaderboard(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Leaderboard ");

    let items: Vec<ListItem> = match app.leaderboard() {
        LeaderboardView::Idle => vec![],
        LeaderboardView::Loading => vec![ListItem::new("Loading...")],
        LeaderboardView::Unavailable(message) => vec![ListItem::new(Span::styled(
            format!("Unavailable: {message}"),
            Style::default().fg(Color::Red),
        ))],
        LeaderboardView::Ready(standings) if standings.is_empty() => {
            vec![ListItem::new("No games recorded yet")]
        },
        LeaderboardView::Ready(standings) => standings
            .iter()
            .enumerate()
            .map(|(rank, standing)| {
                ListItem::new(format!(
                    "{:>3}. {:<NAME_WIDTH$} avg {:>8.1}  games {:>4}  total {:>8}",
                    rank + 1,
                    standing.name,
                    standing.average_score(),
                    standing.games_played,
                    standing.total_score
                ))
            })
            .collect(),
    };

    frame.render_widget(List::new(items).block(block), area);
}
