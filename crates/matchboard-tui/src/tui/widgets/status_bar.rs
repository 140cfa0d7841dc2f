// Status bar widget: phase, match range, pulse banner, clock.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use matchboard_core::board::{Board, BoardPhase};

use crate::app::App;

/// Render the status bar into the given area.
///
/// Layout: [phase] [match range] [pulse banner] [paused] ... [clock]
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.board.phase().label()),
        phase_style(app.board.phase()),
    )];

    if let Some(range) = match_range(&app.board) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(range, Style::default().fg(Color::White)));
    }

    if app.effects.is_pulsing() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" MATCHES STARTING ({}s) ", app.effects.pulse_remaining().as_secs()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        ));
    }

    if app.effects.is_paused() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[animations paused]",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let clock = Local::now().format("%H:%M:%S").to_string();
    let used: usize = spans.iter().map(|s| s.width()).sum();
    let pad = (area.width as usize).saturating_sub(used + clock.len() + 1);
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(clock, Style::default().fg(Color::Gray)));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "Matches 4-6 of 30" for the cards currently on screen.
pub fn match_range(board: &Board) -> Option<String> {
    let total = board.matches().len();
    let shown = board.active_matches().len();
    if total == 0 || shown == 0 {
        return None;
    }
    let first = board.current_index() + 1;
    let last = board.current_index() + shown;
    Some(if first == last {
        format!("Match {first} of {total}")
    } else {
        format!("Matches {first}-{last} of {total}")
    })
}

fn phase_style(phase: BoardPhase) -> Style {
    let color = match phase {
        BoardPhase::CollectingSchedule | BoardPhase::CollectingRankings => Color::Yellow,
        BoardPhase::RunningQualifiers => Color::Cyan,
        BoardPhase::RunningEliminations => Color::Magenta,
        BoardPhase::RunningFinals => Color::LightRed,
    };
    Style::default()
        .fg(Color::Black)
        .bg(color)
        .add_modifier(Modifier::BOLD)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use matchboard_core::board::PagingConfig;
    use matchboard_core::config::Config;
    use matchboard_core::model::Match;
    use matchboard_core::seeding::SeedingStrategy;

    fn board(active: usize, n: u32) -> Board {
        let mut board = Board::new(
            SeedingStrategy::Computed,
            PagingConfig {
                active_count: active,
                on_deck_count: 2,
            },
        );
        board
            .load_schedule((1..=n).map(Match::blank).collect())
            .unwrap();
        board
    }

    #[test]
    fn no_range_before_schedule() {
        let board = Board::new(SeedingStrategy::Computed, PagingConfig::default());
        assert_eq!(match_range(&board), None);
    }

    #[test]
    fn range_covers_active_cards() {
        let mut board = board(3, 8);
        assert_eq!(match_range(&board).as_deref(), Some("Matches 1-3 of 8"));
        board.advance();
        board.advance();
        assert_eq!(match_range(&board).as_deref(), Some("Matches 7-8 of 8"));
    }

    #[test]
    fn single_card_range() {
        let board = board(1, 4);
        assert_eq!(match_range(&board).as_deref(), Some("Match 1 of 4"));
    }

    #[test]
    fn shows_phase_and_pulse_banner() {
        let mut app = App::new(Config::default(), std::env::temp_dir());
        app.board.load_schedule(vec![Match::blank(1), Match::blank(2)]).unwrap();
        app.effects.matches_started();
        let backend = ratatui::backend::TestBackend::new(100, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, frame.area(), &app)).unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Qualifiers"));
        assert!(text.contains("Match 1 of 2"));
        assert!(text.contains("MATCHES STARTING"));
    }
}
