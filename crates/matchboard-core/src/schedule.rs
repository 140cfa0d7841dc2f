// Qualifying match schedule loading.
//
// One match per line, blue lane before green:
//   with time:    Match, Time, R1, R2, B1, B2, G1, G2
//   without time: Match, R1, R2, B1, B2, G1, G2
// Lines whose match number does not parse (headers, notes) are dropped.

use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::model::{Match, Slot};
use crate::rows::read_rows;

/// Column order of the team cells after the match number (and time).
const TEAM_COLUMNS: [Slot; 6] = [Slot::R1, Slot::R2, Slot::B1, Slot::B2, Slot::G1, Slot::G2];

/// A row with exactly this many cells carries a time column.
const TIMED_ROW_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

fn parse_row(row: &[String]) -> Option<Match> {
    let number = match row[0].parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            debug!("dropping schedule line starting with '{}'", row[0]);
            return None;
        }
    };

    let (time, teams) = if row.len() == TIMED_ROW_LEN {
        (Some(row[1].clone()).filter(|t| !t.is_empty()), &row[2..])
    } else {
        if row.len() < 1 + TEAM_COLUMNS.len() {
            warn!("match {} has only {} columns; missing teams left blank", number, row.len());
        }
        (None, &row[1..])
    };

    let mut m = Match::blank(number);
    m.time = time;
    for (slot, team) in TEAM_COLUMNS.iter().zip(teams) {
        m.set_team(*slot, team.clone());
    }
    Some(m)
}

pub(crate) fn schedule_from_reader<R: Read>(rdr: R) -> Result<Vec<Match>, csv::Error> {
    let rows = read_rows(rdr)?;
    Ok(rows.iter().filter_map(|row| parse_row(row)).collect())
}

/// Parse a schedule from CSV text already in memory.
pub fn parse_schedule(text: &str) -> Result<Vec<Match>, csv::Error> {
    schedule_from_reader(text.as_bytes())
}

/// Load the qualifying schedule from a CSV file, in file order.
pub fn load_schedule(path: &Path) -> Result<Vec<Match>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(|e| ScheduleError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    schedule_from_reader(file).map_err(|e| ScheduleError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
