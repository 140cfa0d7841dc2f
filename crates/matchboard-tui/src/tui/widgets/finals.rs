// Finals grid widget: editable 2 x 6 table of finals slots.
//
// The cursor cell is highlighted; while editing, it shows the text being
// typed instead of the stored team.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use matchboard_core::model::Slot;

use super::lanes::{lane_color, TBD};
use crate::app::App;
use crate::tui::{InputMode, ViewState};

/// Render the finals editor into the given area.
pub fn render(frame: &mut Frame, area: Rect, app: &App, view: &ViewState) {
    let header_cells: Vec<Cell> = std::iter::once(Cell::from(""))
        .chain(Slot::ALL.into_iter().map(|slot| {
            Cell::from(slot.label()).style(
                Style::default()
                    .fg(lane_color(slot.lane()))
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .collect();
    let header = Row::new(header_cells);

    let rows: Vec<Row> = app
        .board
        .finals()
        .iter()
        .enumerate()
        .map(|(row, m)| {
            let mut cells = vec![Cell::from(format!("F{}", row + 1))];
            for (col, (_, entry)) in m.entries().enumerate() {
                let selected = view.cursor.row == row && view.cursor.col == col;
                cells.push(grid_cell(&entry.team, selected, view));
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(3)];
    widths.extend(std::iter::repeat(Constraint::Fill(1)).take(Slot::ALL.len()));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Finals "));
    frame.render_widget(table, area);
}

fn grid_cell(team: &str, selected: bool, view: &ViewState) -> Cell<'static> {
    if selected && view.mode == InputMode::EditCell {
        return Cell::from(format!("{}_", view.prompt)).style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow),
        );
    }
    let text = if team.trim().is_empty() { TBD.to_string() } else { team.to_string() };
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if team.trim().is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Cell::from(text).style(style)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
