// Application state and command handling.
//
// `App` owns the board state machine, the visual effects and the team
// directory. The TUI translates key presses into `UserCommand`s and hands
// them to `App::handle_command`; rendering reads `App` directly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use matchboard_core::board::{Board, BoardPhase};
use matchboard_core::config::Config;
use matchboard_core::effects::{DisplayCounts, Effects};
use matchboard_core::model::{Lane, Slot};
use matchboard_core::rankings;
use matchboard_core::schedule;
use matchboard_core::teams::{self, TeamDirectory};

/// Virtual pixels per terminal cell used for the confetti simulation.
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Everything the operator can ask the board to do.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    Next,
    Back,
    /// Make the 1-based match position the first active match.
    JumpToStart(usize),
    /// Make the 1-based match position the last active match.
    JumpToEnd(usize),
    NextStage,
    Reload,
    ToggleLane(Lane),
    Confetti,
    ToggleAnimations,
    SetFinalsCell { row: usize, slot: Slot, team: String },
    PasteFinals { row: usize, col: usize, text: String },
    Quit,
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line message shown in the help bar until the next command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub config: Config,
    /// Directory data paths in the config are resolved against.
    pub base_dir: PathBuf,
    pub board: Board,
    pub effects: Effects,
    pub teams: TeamDirectory,
    pub notice: Option<Notice>,
    /// Terminal size in cells, refreshed by the render loop.
    pub screen: (u16, u16),
}

impl App {
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        let effects = Effects::new(config.effect_settings());
        Self::with_effects(config, base_dir, effects)
    }

    /// Build with a prepared effects engine; tests pass a seeded one.
    pub fn with_effects(config: Config, base_dir: PathBuf, effects: Effects) -> Self {
        let board = Board::new(config.seeding.strategy, config.paging());
        App {
            config,
            base_dir,
            board,
            effects,
            teams: TeamDirectory::new(),
            notice: None,
            screen: (80, 24),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Load the team directory and schedule named in the config.
    /// Missing entries are skipped; unreadable files are errors.
    pub fn load_startup_data(&mut self) -> anyhow::Result<()> {
        self.load_teams()?;
        if self.config.data.schedule.is_some() {
            self.load_schedule()?;
        }
        Ok(())
    }

    fn load_teams(&mut self) -> anyhow::Result<()> {
        let Some(path) = self.config.data.teams.as_deref().map(|p| self.resolve(p)) else {
            return Ok(());
        };
        self.teams = teams::load_teams(&path)
            .with_context(|| format!("failed to load teams from {}", path.display()))?;
        info!("Loaded {} team names from {}", self.teams.len(), path.display());
        Ok(())
    }

    fn load_schedule(&mut self) -> anyhow::Result<()> {
        let path = self
            .config
            .data
            .schedule
            .as_deref()
            .map(|p| self.resolve(p))
            .context("no schedule file configured ([data] schedule)")?;
        let matches = schedule::load_schedule(&path)
            .with_context(|| format!("failed to load schedule from {}", path.display()))?;
        self.board.load_schedule(matches)?;
        Ok(())
    }

    fn load_rankings(&mut self) -> anyhow::Result<usize> {
        let path = self
            .config
            .data
            .rankings
            .as_deref()
            .map(|p| self.resolve(p))
            .context("no rankings file configured ([data] rankings)")?;
        let list = rankings::load_rankings(&path)
            .with_context(|| format!("failed to load rankings from {}", path.display()))?;
        Ok(self.board.load_rankings(list)?)
    }

    /// Re-read the files relevant to the current phase.
    pub fn reload(&mut self) -> anyhow::Result<String> {
        self.load_teams()?;
        match self.board.phase() {
            BoardPhase::CollectingSchedule | BoardPhase::RunningQualifiers => {
                self.load_schedule()?;
                Ok(format!("Schedule loaded: {} matches", self.board.qualifiers().len()))
            }
            BoardPhase::CollectingRankings => {
                let bracket = self.load_rankings()?;
                Ok(format!(
                    "Rankings loaded: {} teams, {} elimination matches",
                    self.board.rankings().len(),
                    bracket
                ))
            }
            BoardPhase::RunningEliminations | BoardPhase::RunningFinals => {
                Ok(format!("Team names reloaded: {}", self.teams.len()))
            }
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!("{}", text);
        self.notice = Some(Notice {
            level: NoticeLevel::Error,
            text,
        });
    }

    /// Apply one operator command.
    pub fn handle_command(&mut self, cmd: UserCommand) {
        self.notice = None;
        match cmd {
            UserCommand::Next => {
                if self.board.advance() {
                    self.effects.matches_started();
                } else {
                    self.set_info("Already showing the last matches");
                }
            }
            UserCommand::Back => {
                self.board.retreat();
            }
            UserCommand::JumpToStart(n) => {
                if !self.board.jump_to_start(n) {
                    self.set_error(format!("No match at position {n}"));
                }
            }
            UserCommand::JumpToEnd(n) => {
                if !self.board.jump_to_end(n) {
                    self.set_error(format!("No match at position {n}"));
                }
            }
            UserCommand::NextStage => match self.board.next_stage() {
                Ok(phase) => {
                    info!("Advanced to {}", phase);
                    // Entering the rankings phase picks up a configured file.
                    if phase == BoardPhase::CollectingRankings && self.config.data.rankings.is_some() {
                        match self.load_rankings() {
                            Ok(n) => self.set_info(format!("{phase}: {n} elimination matches ready")),
                            Err(e) => self.set_error(format!("{e:#}")),
                        }
                    } else {
                        self.set_info(phase.label());
                    }
                }
                Err(e) => self.set_error(e.to_string()),
            },
            UserCommand::Reload => match self.reload() {
                Ok(msg) => self.set_info(msg),
                Err(e) => self.set_error(format!("{e:#}")),
            },
            UserCommand::ToggleLane(lane) => {
                let visible = self.board.toggle_lane(lane);
                self.set_info(format!(
                    "{} lane {}",
                    lane.display_str(),
                    if visible { "shown" } else { "hidden" }
                ));
            }
            UserCommand::Confetti => {
                let (w, h) = self.screen;
                self.effects
                    .launch_confetti(f64::from(w) * CELL_WIDTH_PX, f64::from(h) * CELL_HEIGHT_PX);
            }
            UserCommand::ToggleAnimations => {
                let paused = self.effects.toggle_paused();
                self.set_info(if paused { "Animations paused" } else { "Animations resumed" });
            }
            UserCommand::SetFinalsCell { row, slot, team } => {
                if let Err(e) = self.board.set_finals_slot(row, slot, &team) {
                    self.set_error(e.to_string());
                }
            }
            UserCommand::PasteFinals { row, col, text } => {
                match self.board.paste_finals(row, col, &text) {
                    Ok(n) => self.set_info(format!("Pasted {n} cells")),
                    Err(e) => self.set_error(e.to_string()),
                }
            }
            UserCommand::Quit => {}
        }
    }

    /// Cards currently on screen, as seen by the effects.
    pub fn display_counts(&self) -> DisplayCounts {
        DisplayCounts {
            active: self.board.active_matches().len(),
            on_deck: self.board.on_deck_matches().len(),
        }
    }

    /// Advance animations by one frame.
    pub fn tick(&mut self, dt: Duration) {
        let counts = self.display_counts();
        self.effects.tick(dt, counts);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
