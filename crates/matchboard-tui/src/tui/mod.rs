// Terminal front end: layout, input handling and widget rendering.
//
// Rendering reads `App` directly. `ViewState` holds what only the terminal
// cares about: the input mode, prompt text and the finals cursor. The loop
// redraws at ~30 fps and ticks the effects with the measured frame time.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::time::Instant;
use tracing::{info, warn};

use matchboard_core::board::BoardPhase;
use matchboard_core::model::Slot;

use crate::app::{App, NoticeLevel, UserCommand};
use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a match number to show first.
    GotoStart,
    /// Typing a match number to show last.
    GotoEnd,
    /// Typing a team into the finals cell under the cursor.
    EditCell,
    ConfirmQuit,
}

/// Selected cell in the finals grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinalsCursor {
    pub row: usize,
    pub col: usize,
}

impl FinalsCursor {
    /// Move within a `rows` x 6 grid, stopping at the edges.
    pub fn move_by(&mut self, d_row: isize, d_col: isize, rows: usize) {
        let max_row = rows.saturating_sub(1) as isize;
        let max_col = Slot::ALL.len() as isize - 1;
        self.row = (self.row as isize + d_row).clamp(0, max_row) as usize;
        self.col = (self.col as isize + d_col).clamp(0, max_col) as usize;
    }
}

/// Terminal-only state.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub mode: InputMode,
    /// Text typed into the current prompt.
    pub prompt: String,
    pub cursor: FinalsCursor,
    /// Rows in the finals grid; zero outside the finals phase.
    pub finals_rows: usize,
}

impl ViewState {
    pub fn enter_prompt(&mut self, mode: InputMode) {
        self.mode = mode;
        self.prompt.clear();
    }

    pub fn leave_prompt(&mut self) {
        self.mode = InputMode::Normal;
        self.prompt.clear();
    }

    /// Pick up board changes that affect input handling.
    pub fn sync(&mut self, app: &App) {
        self.finals_rows = if app.board.phase() == BoardPhase::RunningFinals {
            app.board.finals().len()
        } else {
            0
        };
        if self.finals_rows == 0 {
            self.cursor = FinalsCursor::default();
            if self.mode == InputMode::EditCell {
                self.leave_prompt();
            }
        } else {
            self.cursor.move_by(0, 0, self.finals_rows);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete board.
pub fn render_frame(frame: &mut Frame, app: &App, view: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, app);
    render_main(frame, &layout, app, view);
    render_help_bar(frame, &layout, app, view);

    widgets::confetti::render(frame, frame.area(), app.effects.particles());

    if view.mode == InputMode::ConfirmQuit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_main(frame: &mut Frame, layout: &AppLayout, app: &App, view: &ViewState) {
    match app.board.phase() {
        BoardPhase::CollectingSchedule => {
            widgets::waiting::render(frame, layout.main_panel, app);
            widgets::on_deck::render(frame, layout.side_panel, app);
        }
        BoardPhase::CollectingRankings => {
            widgets::rankings::render(frame, layout.main_panel, app);
            widgets::bracket::render(frame, layout.side_panel, app);
        }
        BoardPhase::RunningQualifiers | BoardPhase::RunningEliminations => {
            widgets::active_matches::render(frame, layout.main_panel, app);
            widgets::on_deck::render(frame, layout.side_panel, app);
        }
        BoardPhase::RunningFinals => {
            widgets::active_matches::render(frame, layout.main_panel, app);
            widgets::finals::render(frame, layout.side_panel, app, view);
        }
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, app: &App, view: &ViewState) {
    let line = match view.mode {
        InputMode::GotoStart => prompt_line("Go to match (first): ", &view.prompt),
        InputMode::GotoEnd => prompt_line("Go to match (last): ", &view.prompt),
        InputMode::EditCell => prompt_line("Team: ", &view.prompt),
        InputMode::ConfirmQuit | InputMode::Normal => match &app.notice {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => Color::Cyan,
                    NoticeLevel::Error => Color::Red,
                };
                Line::from(Span::styled(
                    format!(" {}", notice.text),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
            }
            None => Line::from(Span::styled(
                help_text(app.board.phase()),
                Style::default().fg(Color::White).add_modifier(Modifier::DIM),
            )),
        },
    };
    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

fn prompt_line(label: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {label}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{text}_")),
        Span::styled("  Enter:OK  Esc:Cancel", Style::default().add_modifier(Modifier::DIM)),
    ])
}

/// Key hints for the help bar.
pub fn help_text(phase: BoardPhase) -> &'static str {
    match phase {
        BoardPhase::CollectingSchedule => " l:Load schedule | Space:Confetti | q:Quit",
        BoardPhase::CollectingRankings => " l:Load rankings | s:Start eliminations | q:Quit",
        BoardPhase::RunningFinals => {
            " n/b:Page | Arrows:Cell | e:Edit | Paste:Fill grid | 1-3:Lanes | Space:Confetti | q:Quit"
        }
        BoardPhase::RunningQualifiers | BoardPhase::RunningEliminations => {
            " n/b:Page | g/G:Go to | s:Next stage | l:Reload | 1-3:Lanes | Space:Confetti | a:Animations | q:Quit"
        }
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the operator quits.
///
/// 1. Initialize the terminal and enable bracketed paste.
/// 2. Install a panic hook that restores the terminal.
/// 3. Select over terminal events and the render tick.
/// 4. Restore the terminal on exit.
pub async fn run(mut app: App) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableBracketedPaste) {
        warn!("bracketed paste unavailable: {}", e);
    }

    // 2. Restore the terminal before the default panic output.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    // 3. Render interval (~30fps); each tick also advances the effects.
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                let cmd = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        view_state.sync(&app);
                        input::handle_key(key_event, &mut view_state)
                    }
                    Some(Ok(Event::Paste(text))) => {
                        view_state.sync(&app);
                        input::handle_paste(&text, &mut view_state)
                    }
                    Some(Ok(_)) => None,
                    Some(Err(e)) => {
                        warn!("terminal input error: {}", e);
                        break;
                    }
                    None => break,
                };
                match cmd {
                    Some(UserCommand::Quit) => break,
                    Some(cmd) => {
                        app.handle_command(cmd);
                        view_state.sync(&app);
                    }
                    None => {}
                }
            }

            _ = render_tick.tick() => {
                let now = Instant::now();
                app.tick(now - last_frame);
                last_frame = now;
                let completed = terminal.draw(|frame| render_frame(frame, &app, &view_state))?;
                app.screen = (completed.area.width, completed.area.height);
            }
        }
    }

    // 4. Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();
    info!("Terminal restored");

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
