// Terminal front end for the match board: application state, input handling
// and ratatui rendering on top of `matchboard-core`.

pub mod app;
pub mod tui;
