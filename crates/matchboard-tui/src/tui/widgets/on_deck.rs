// On-deck widget: the matches queued after the active ones.
//
// The entry picked by the jiggle cascade is nudged sideways and highlighted.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::lanes::{lane_line, match_title};
use crate::app::App;

/// Columns a jiggling entry is shifted by.
const JIGGLE_OFFSET: usize = 2;

/// Render the on-deck queue into the given area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let matches = app.board.on_deck_matches();
    let jiggling = app.effects.jiggling_index();
    let lanes = app.board.visible_lanes();

    let mut lines: Vec<Line> = Vec::new();
    if matches.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing on deck",
            Style::default().fg(Color::Gray),
        )));
    }

    for (i, m) in matches.iter().enumerate() {
        let is_jiggling = jiggling == Some(i);
        let indent = if is_jiggling { " ".repeat(JIGGLE_OFFSET) } else { String::new() };
        let title_style = if is_jiggling {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(match_title(m), title_style),
        ]));
        for lane in &lanes {
            let mut line = lane_line(&app.teams, m, *lane, false);
            line.spans.insert(0, Span::raw(format!("{indent}  ")));
            lines.push(line);
        }
        lines.push(Line::default());
    }

    let title = format!(" On Deck ({} more) ", app.board.remaining_after_current());
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use matchboard_core::config::Config;
    use matchboard_core::effects::{DisplayCounts, EffectSettings, Effects};
    use matchboard_core::model::Match;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app(n: u32) -> App {
        let effects = Effects::with_rng(EffectSettings::default(), StdRng::seed_from_u64(2));
        let mut app = App::with_effects(Config::default(), std::env::temp_dir(), effects);
        if n > 0 {
            app.board
                .load_schedule(
                    (1..=n)
                        .map(|i| Match::with_teams(i, ["1", "2", "3", "4", "5", "6"]))
                        .collect(),
                )
                .unwrap();
        }
        app
    }

    fn rows(app: &App) -> Vec<String> {
        let backend = TestBackend::new(50, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, frame.area(), app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn lists_following_matches() {
        let app = app(6);
        let rows = rows(&app);
        let all = rows.concat();
        assert!(all.contains("On Deck (5 more)"));
        assert!(all.contains("Match 2"));
        assert!(all.contains("Match 4"));
        assert!(!all.contains("Match 5"));
    }

    #[test]
    fn empty_queue_placeholder() {
        let rows = rows(&app(0));
        assert!(rows.concat().contains("Nothing on deck"));
    }

    #[test]
    fn jiggling_entry_is_indented() {
        let mut app = app(6);
        app.effects.trigger_cascades(DisplayCounts { active: 1, on_deck: 3 });
        assert_eq!(app.effects.jiggling_index(), Some(0));
        let rows = rows(&app);
        let title_row = rows.iter().find(|r| r.contains("Match 2")).unwrap();
        // Border, then the jiggle offset.
        assert!(title_row.starts_with("│  Match 2"), "{title_row:?}");
        let other = rows.iter().find(|r| r.contains("Match 3")).unwrap();
        assert!(other.starts_with("│Match 3"), "{other:?}");
    }
}
