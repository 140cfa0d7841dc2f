// Waiting panel: shown before a schedule is loaded.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let source = match app.config.data.schedule.as_deref() {
        Some(path) => format!("Schedule file: {}", path.display()),
        None => "No schedule file configured ([data] schedule in config/board.toml)".to_string(),
    };
    let lines = vec![
        Line::from(Span::styled(
            "Waiting for schedule",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(source),
        Line::from(format!("Team names loaded: {}", app.teams.len())),
        Line::default(),
        Line::from(Span::styled("Press l to load", Style::default().fg(Color::Gray))),
    ];
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Match Board "));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchboard_core::config::Config;
    use std::path::PathBuf;

    #[test]
    fn names_the_configured_file() {
        let mut app = App::new(Config::default(), std::env::temp_dir());
        app.config.data.schedule = Some(PathBuf::from("data/matches.csv"));
        let backend = ratatui::backend::TestBackend::new(80, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, frame.area(), &app)).unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Waiting for schedule"));
        assert!(text.contains("Schedule file: data/matches.csv"));
    }
}
