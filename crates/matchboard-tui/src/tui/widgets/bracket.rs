// Bracket preview widget: the elimination matches the current rankings
// would produce, shown before eliminations start.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use matchboard_core::seeding::TEAMS_PER_MATCH;

use super::lanes::lane_line;
use crate::app::App;

/// Render the bracket preview into the given area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let bracket = app.board.bracket_preview();
    let title = format!(" Bracket Preview ({}) ", app.board.strategy());

    let mut lines: Vec<Line> = Vec::new();
    if bracket.is_empty() {
        let valid = app.board.rankings().iter().filter(|r| r.is_valid()).count();
        lines.push(Line::from(Span::styled(
            format!("Need at least {TEAMS_PER_MATCH} ranked teams ({valid} loaded)"),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Press s to start eliminations",
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::default());
    }

    for m in &bracket {
        lines.push(Line::from(Span::styled(
            format!("Elimination {}", m.number),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for lane in app.board.visible_lanes() {
            lines.push(lane_line(&app.teams, m, lane, false));
        }
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
