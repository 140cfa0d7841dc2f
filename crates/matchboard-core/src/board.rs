// Board state: which stage of the tournament is on screen and which matches
// are active / on deck.
//
// The board is a finite-state machine:
//
//   CollectingSchedule --load_schedule--> RunningQualifiers
//   RunningQualifiers  --finish_qualifiers--> CollectingRankings
//   CollectingRankings --start_eliminations--> RunningEliminations
//   RunningEliminations --start_finals--> RunningFinals
//   any --reset--> CollectingSchedule
//
// Each running phase pages through its own match list. Entering a new phase
// always starts paging from the first match.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::{Lane, Match, Slot};
use crate::rankings::RankedCompetitor;
use crate::seeding::{self, SeedingStrategy, FINALS_MATCH_COUNT, TEAMS_PER_MATCH};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardPhase {
    CollectingSchedule,
    RunningQualifiers,
    CollectingRankings,
    RunningEliminations,
    RunningFinals,
}

impl BoardPhase {
    /// Whether this phase shows matches that can be paged through.
    pub fn is_running(self) -> bool {
        matches!(
            self,
            BoardPhase::RunningQualifiers | BoardPhase::RunningEliminations | BoardPhase::RunningFinals
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            BoardPhase::CollectingSchedule => "Waiting for schedule",
            BoardPhase::RunningQualifiers => "Qualifiers",
            BoardPhase::CollectingRankings => "Rankings",
            BoardPhase::RunningEliminations => "Eliminations",
            BoardPhase::RunningFinals => "Finals",
        }
    }
}

impl fmt::Display for BoardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("cannot {action} while in phase {phase}")]
    InvalidTransition {
        phase: BoardPhase,
        action: &'static str,
    },

    #[error("schedule contains no matches")]
    EmptySchedule,

    #[error("need at least {needed} ranked teams for eliminations, have {valid}")]
    NotEnoughCompetitors { valid: usize, needed: usize },

    #[error("finals match {row} does not exist")]
    NoSuchFinalsMatch { row: usize },
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// How many matches the board shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    /// Matches shown as currently playing.
    pub active_count: usize,
    /// Matches shown as on deck after the active ones.
    pub on_deck_count: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        PagingConfig {
            active_count: 1,
            on_deck_count: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    phase: BoardPhase,
    strategy: SeedingStrategy,
    paging: PagingConfig,
    qualifiers: Vec<Match>,
    rankings: Vec<RankedCompetitor>,
    eliminations: Vec<Match>,
    finals: Vec<Match>,
    current_index: usize,
    hidden_lanes: HashSet<Lane>,
}

impl Board {
    pub fn new(strategy: SeedingStrategy, paging: PagingConfig) -> Self {
        Board {
            phase: BoardPhase::CollectingSchedule,
            strategy,
            paging: PagingConfig {
                active_count: paging.active_count.max(1),
                on_deck_count: paging.on_deck_count,
            },
            qualifiers: Vec::new(),
            rankings: Vec::new(),
            eliminations: Vec::new(),
            finals: Vec::new(),
            current_index: 0,
            hidden_lanes: HashSet::new(),
        }
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn strategy(&self) -> SeedingStrategy {
        self.strategy
    }

    pub fn paging(&self) -> PagingConfig {
        self.paging
    }

    pub fn rankings(&self) -> &[RankedCompetitor] {
        &self.rankings
    }

    pub fn qualifiers(&self) -> &[Match] {
        &self.qualifiers
    }

    pub fn eliminations(&self) -> &[Match] {
        &self.eliminations
    }

    pub fn finals(&self) -> &[Match] {
        &self.finals
    }

    /// Zero-based index of the first active match.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    fn enter(&mut self, phase: BoardPhase) {
        info!("board phase {} -> {}", self.phase, phase);
        self.phase = phase;
        self.current_index = 0;
    }

    fn require(&self, allowed: &[BoardPhase], action: &'static str) -> Result<(), BoardError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(BoardError::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }

    // -- transitions ------------------------------------------------------

    /// Install the qualifying schedule and start running it. Reloading while
    /// qualifiers run replaces the schedule and starts from the top.
    pub fn load_schedule(&mut self, matches: Vec<Match>) -> Result<(), BoardError> {
        self.require(
            &[BoardPhase::CollectingSchedule, BoardPhase::RunningQualifiers],
            "load a schedule",
        )?;
        if matches.is_empty() {
            return Err(BoardError::EmptySchedule);
        }
        info!("loaded schedule with {} matches", matches.len());
        self.qualifiers = matches;
        self.enter(BoardPhase::RunningQualifiers);
        Ok(())
    }

    pub fn finish_qualifiers(&mut self) -> Result<(), BoardError> {
        self.require(&[BoardPhase::RunningQualifiers], "finish qualifiers")?;
        self.enter(BoardPhase::CollectingRankings);
        Ok(())
    }

    /// Replace the rankings list. Returns how many elimination matches the
    /// current rankings would produce.
    pub fn load_rankings(&mut self, rankings: Vec<RankedCompetitor>) -> Result<usize, BoardError> {
        self.require(&[BoardPhase::CollectingRankings], "load rankings")?;
        self.rankings = rankings;
        let preview = self.bracket_preview().len();
        info!(
            "loaded {} rankings, {} elimination matches possible",
            self.rankings.len(),
            preview
        );
        Ok(preview)
    }

    /// The bracket the current rankings would produce.
    pub fn bracket_preview(&self) -> Vec<Match> {
        seeding::generate_matches(&self.rankings, self.strategy)
    }

    /// Seed the elimination bracket from the loaded rankings. Stays in
    /// `CollectingRankings` when the rankings cannot fill a match.
    pub fn start_eliminations(&mut self) -> Result<(), BoardError> {
        self.require(&[BoardPhase::CollectingRankings], "start eliminations")?;
        let bracket = self.bracket_preview();
        if bracket.is_empty() {
            let valid = self.rankings.iter().filter(|r| r.is_valid()).count();
            warn!("not enough ranked teams for eliminations ({} valid)", valid);
            return Err(BoardError::NotEnoughCompetitors {
                valid,
                needed: TEAMS_PER_MATCH,
            });
        }
        self.eliminations = bracket;
        self.enter(BoardPhase::RunningEliminations);
        Ok(())
    }

    pub fn start_finals(&mut self) -> Result<(), BoardError> {
        self.require(&[BoardPhase::RunningEliminations], "start finals")?;
        self.finals = seeding::create_empty_match_template(FINALS_MATCH_COUNT);
        self.enter(BoardPhase::RunningFinals);
        Ok(())
    }

    /// Move to whatever stage follows the current one.
    pub fn next_stage(&mut self) -> Result<BoardPhase, BoardError> {
        match self.phase {
            BoardPhase::RunningQualifiers => self.finish_qualifiers()?,
            BoardPhase::CollectingRankings => self.start_eliminations()?,
            BoardPhase::RunningEliminations => self.start_finals()?,
            phase => {
                return Err(BoardError::InvalidTransition {
                    phase,
                    action: "advance to the next stage",
                })
            }
        }
        Ok(self.phase)
    }

    /// Drop everything and wait for a new schedule.
    pub fn reset(&mut self) {
        self.qualifiers.clear();
        self.rankings.clear();
        self.eliminations.clear();
        self.finals.clear();
        self.hidden_lanes.clear();
        self.enter(BoardPhase::CollectingSchedule);
    }

    // -- paging -----------------------------------------------------------

    /// Matches of the current phase. Empty outside running phases.
    pub fn matches(&self) -> &[Match] {
        match self.phase {
            BoardPhase::RunningQualifiers => &self.qualifiers,
            BoardPhase::RunningEliminations => &self.eliminations,
            BoardPhase::RunningFinals => &self.finals,
            BoardPhase::CollectingSchedule | BoardPhase::CollectingRankings => &[],
        }
    }

    pub fn active_matches(&self) -> &[Match] {
        let matches = self.matches();
        let start = self.current_index.min(matches.len());
        let end = (start + self.paging.active_count).min(matches.len());
        &matches[start..end]
    }

    pub fn on_deck_matches(&self) -> &[Match] {
        let matches = self.matches();
        let start = (self.current_index + self.paging.active_count).min(matches.len());
        let end = (start + self.paging.on_deck_count).min(matches.len());
        &matches[start..end]
    }

    /// Matches after the first active one, whether or not they fit on screen.
    pub fn remaining_after_current(&self) -> usize {
        self.matches().len().saturating_sub(self.current_index + 1)
    }

    /// Show the next page of matches. Returns false when already on the last
    /// page.
    pub fn advance(&mut self) -> bool {
        let step = self.paging.active_count;
        if self.current_index + step < self.matches().len() {
            self.current_index += step;
            true
        } else {
            false
        }
    }

    /// Show the previous page of matches. Returns false when already at the
    /// start.
    pub fn retreat(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index = self.current_index.saturating_sub(self.paging.active_count);
        true
    }

    /// Make the 1-based `position` the first active match.
    pub fn jump_to_start(&mut self, position: usize) -> bool {
        if position == 0 || position > self.matches().len() {
            return false;
        }
        self.current_index = position - 1;
        true
    }

    /// Make the 1-based `position` the last active match.
    pub fn jump_to_end(&mut self, position: usize) -> bool {
        if position == 0 || position > self.matches().len() {
            return false;
        }
        self.current_index = (position - 1).saturating_sub(self.paging.active_count - 1);
        true
    }

    // -- lanes ------------------------------------------------------------

    /// Hide or show a lane. Returns true when the lane is now visible.
    pub fn toggle_lane(&mut self, lane: Lane) -> bool {
        if self.hidden_lanes.remove(&lane) {
            true
        } else {
            self.hidden_lanes.insert(lane);
            false
        }
    }

    pub fn is_lane_visible(&self, lane: Lane) -> bool {
        !self.hidden_lanes.contains(&lane)
    }

    pub fn visible_lanes(&self) -> Vec<Lane> {
        Lane::ALL
            .into_iter()
            .filter(|lane| self.is_lane_visible(*lane))
            .collect()
    }

    // -- finals editing ---------------------------------------------------

    /// Put a team into one finals slot.
    pub fn set_finals_slot(&mut self, row: usize, slot: Slot, team: &str) -> Result<(), BoardError> {
        self.require(&[BoardPhase::RunningFinals], "edit finals")?;
        let m = self
            .finals
            .get_mut(row)
            .ok_or(BoardError::NoSuchFinalsMatch { row })?;
        m.set_team(slot, team.trim());
        Ok(())
    }

    /// Paste clipboard text into the finals grid starting at (`row`, `col`).
    /// Returns how many cells were written.
    pub fn paste_finals(&mut self, row: usize, col: usize, text: &str) -> Result<usize, BoardError> {
        self.require(&[BoardPhase::RunningFinals], "paste into finals")?;
        if row >= self.finals.len() {
            return Err(BoardError::NoSuchFinalsMatch { row });
        }
        Ok(paste_grid(&mut self.finals, row, col, text))
    }
}

/// Write tab/newline separated text into `matches` as a grid whose columns
/// are the six slots. Text without tabs or line breaks fills a single cell.
/// Cells falling outside the grid are dropped.
pub fn paste_grid(matches: &mut [Match], row: usize, col: usize, text: &str) -> usize {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let is_table = lines.len() > 1 || text.contains('\t');

    if !is_table {
        return match (matches.get_mut(row), Slot::from_index(col)) {
            (Some(m), Some(slot)) => {
                m.set_team(slot, text.trim());
                1
            }
            _ => 0,
        };
    }

    let mut written = 0;
    for (dr, line) in lines.iter().enumerate() {
        let Some(m) = matches.get_mut(row + dr) else {
            break;
        };
        for (dc, cell) in line.split('\t').enumerate() {
            if let Some(slot) = Slot::from_index(col + dc) {
                m.set_team(slot, cell.trim());
                written += 1;
            }
        }
    }
    written
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
