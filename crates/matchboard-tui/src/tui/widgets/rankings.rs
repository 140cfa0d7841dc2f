// Rankings widget: the loaded ranking list during the rankings phase.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use matchboard_core::rankings::RankedCompetitor;

use crate::app::App;

/// Render the rankings table into the given area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let list = app.board.rankings();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Rankings ({} teams) ", list.len()));

    if list.is_empty() {
        let paragraph = Paragraph::new("No rankings loaded. Press l to load the rankings file.")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![Cell::from("Rank"), Cell::from("Number"), Cell::from("Team")]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = list.iter().map(ranking_row).collect();
    let widths = [Constraint::Length(5), Constraint::Length(8), Constraint::Min(16)];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn ranking_row(r: &RankedCompetitor) -> Row<'static> {
    let style = if r.is_valid() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Row::new(vec![
        Cell::from(r.rank.to_string()),
        Cell::from(r.number.clone().unwrap_or_default()),
        Cell::from(r.name.clone()),
    ])
    .style(style)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
