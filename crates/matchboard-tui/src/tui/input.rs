// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into `UserCommand`s for the app, or into
// local `ViewState` changes (prompt text, finals cursor, quit confirmation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use matchboard_core::model::{Lane, Slot};

use super::{InputMode, ViewState};
use crate::app::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should reach the app.
/// Returns `None` when it only changed `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Press and Release separately on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C quits from any mode.
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    match view_state.mode {
        InputMode::Normal => handle_normal(key_event, view_state),
        InputMode::ConfirmQuit => handle_confirm_quit(key_event, view_state),
        InputMode::GotoStart | InputMode::GotoEnd => handle_goto(key_event, view_state),
        InputMode::EditCell => handle_edit_cell(key_event, view_state),
    }
}

/// Handle bracketed-paste text.
///
/// In finals the text lands at the cursor; while editing a cell it is
/// appended to the cell text.
pub fn handle_paste(text: &str, view_state: &mut ViewState) -> Option<UserCommand> {
    match view_state.mode {
        InputMode::EditCell => {
            view_state.prompt.push_str(text.trim_end_matches(['\r', '\n']));
            None
        }
        InputMode::Normal if view_state.finals_rows > 0 => Some(UserCommand::PasteFinals {
            row: view_state.cursor.row,
            col: view_state.cursor.col,
            text: text.to_string(),
        }),
        _ => None,
    }
}

fn handle_normal(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let editing_finals = view_state.finals_rows > 0;

    match key_event.code {
        KeyCode::Char('n') => Some(UserCommand::Next),
        KeyCode::Char('b') => Some(UserCommand::Back),

        // Arrows drive the finals cursor; elsewhere left/right page.
        KeyCode::Right if editing_finals => {
            view_state.cursor.move_by(0, 1, view_state.finals_rows);
            None
        }
        KeyCode::Left if editing_finals => {
            view_state.cursor.move_by(0, -1, view_state.finals_rows);
            None
        }
        KeyCode::Up if editing_finals => {
            view_state.cursor.move_by(-1, 0, view_state.finals_rows);
            None
        }
        KeyCode::Down if editing_finals => {
            view_state.cursor.move_by(1, 0, view_state.finals_rows);
            None
        }
        KeyCode::Right => Some(UserCommand::Next),
        KeyCode::Left => Some(UserCommand::Back),

        KeyCode::Char('g') => {
            view_state.enter_prompt(InputMode::GotoStart);
            None
        }
        KeyCode::Char('G') => {
            view_state.enter_prompt(InputMode::GotoEnd);
            None
        }
        KeyCode::Char('e') if editing_finals => {
            view_state.enter_prompt(InputMode::EditCell);
            None
        }

        KeyCode::Char('s') => Some(UserCommand::NextStage),
        KeyCode::Char('l') => Some(UserCommand::Reload),
        KeyCode::Char('1') => Some(UserCommand::ToggleLane(Lane::Red)),
        KeyCode::Char('2') => Some(UserCommand::ToggleLane(Lane::Green)),
        KeyCode::Char('3') => Some(UserCommand::ToggleLane(Lane::Blue)),
        KeyCode::Char(' ') => Some(UserCommand::Confetti),
        KeyCode::Char('a') => Some(UserCommand::ToggleAnimations),

        // Quit asks first.
        KeyCode::Char('q') => {
            view_state.mode = InputMode::ConfirmQuit;
            None
        }

        _ => None,
    }
}

/// In quit confirmation: y/q confirm, n/Esc cancel, everything else is
/// swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.mode = InputMode::Normal;
            None
        }
        _ => None,
    }
}

/// Match number prompt: digits only, Enter submits, Esc cancels.
fn handle_goto(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            view_state.prompt.push(c);
            None
        }
        KeyCode::Backspace => {
            view_state.prompt.pop();
            None
        }
        KeyCode::Esc => {
            view_state.leave_prompt();
            None
        }
        KeyCode::Enter => {
            let mode = view_state.mode;
            let position = view_state.prompt.parse::<usize>().ok();
            view_state.leave_prompt();
            match (mode, position) {
                (InputMode::GotoStart, Some(n)) => Some(UserCommand::JumpToStart(n)),
                (InputMode::GotoEnd, Some(n)) => Some(UserCommand::JumpToEnd(n)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Finals cell editor: free text, Enter commits (empty clears the cell),
/// Esc discards.
fn handle_edit_cell(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(c) => {
            view_state.prompt.push(c);
            None
        }
        KeyCode::Backspace => {
            view_state.prompt.pop();
            None
        }
        KeyCode::Esc => {
            view_state.leave_prompt();
            None
        }
        KeyCode::Enter => {
            let team = std::mem::take(&mut view_state.prompt);
            view_state.leave_prompt();
            let slot = Slot::from_index(view_state.cursor.col)?;
            Some(UserCommand::SetFinalsCell {
                row: view_state.cursor.row,
                slot,
                team,
            })
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
