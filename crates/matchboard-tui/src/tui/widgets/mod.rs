// TUI widget modules for each board panel.

pub mod active_matches;
pub mod bracket;
pub mod confetti;
pub mod finals;
pub mod lanes;
pub mod on_deck;
pub mod quit_confirm;
pub mod rankings;
pub mod status_bar;
pub mod waiting;
