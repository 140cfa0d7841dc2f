// Active matches widget: one card per table for the matches being played.
//
// The card picked by the table-spin cascade gets a highlighted border.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use matchboard_core::model::Match;

use super::lanes::{lane_line, match_title};
use crate::app::App;

/// Render the active match cards into the given area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let matches = app.board.active_matches();
    if matches.is_empty() {
        let paragraph = Paragraph::new("No matches to show")
            .block(Block::default().borders(Borders::ALL).title("Now Playing"));
        frame.render_widget(paragraph, area);
        return;
    }

    let constraints = vec![Constraint::Ratio(1, matches.len() as u32); matches.len()];
    let cards = Layout::vertical(constraints).split(area);
    let spinning = app.effects.spinning_index();

    for (i, (m, card)) in matches.iter().zip(cards.iter()).enumerate() {
        render_card(frame, *card, app, m, i + 1, spinning == Some(i));
    }
}

fn render_card(frame: &mut Frame, area: Rect, app: &App, m: &Match, table: usize, spinning: bool) {
    let border_style = if spinning {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let title = card_title(m, table, spinning);

    let lines: Vec<Line> = app
        .board
        .visible_lanes()
        .into_iter()
        .map(|lane| lane_line(&app.teams, m, lane, true))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

/// `Table 2 | Match 14 - 10:40`, with a marker while spinning.
pub fn card_title(m: &Match, table: usize, spinning: bool) -> String {
    let marker = if spinning { "↻ " } else { "" };
    format!(" {marker}Table {table} | {} ", match_title(m))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
