// Library root: match data, seeding, the board state machine and the visual
// effects behind the match board display.

pub mod board;
pub mod config;
pub mod effects;
pub mod model;
pub mod rankings;
mod rows;
pub mod schedule;
pub mod seeding;
pub mod teams;
