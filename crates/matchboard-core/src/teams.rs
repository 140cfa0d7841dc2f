// Team directory: team number -> team name, for display.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::rows::read_rows;

#[derive(Debug, thiserror::Error)]
pub enum TeamsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Lookup table from team number to team name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDirectory {
    names: HashMap<String, String>,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team. The first name registered for a number is kept.
    /// Returns false when the number was already present or either value
    /// is blank.
    pub fn insert(&mut self, number: &str, name: &str) -> bool {
        let (number, name) = (number.trim(), name.trim());
        if number.is_empty() || name.is_empty() || self.names.contains_key(number) {
            return false;
        }
        self.names.insert(number.to_string(), name.to_string());
        true
    }

    pub fn name(&self, number: &str) -> Option<&str> {
        self.names.get(number.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display text for a slot identifier.
    ///
    /// Known numbers show the team name; unknown numbers show `#<number>`;
    /// identifiers that are already names are shown as-is.
    pub fn display(&self, identifier: &str) -> String {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return String::new();
        }
        match self.name(identifier) {
            Some(name) => name.to_string(),
            None if identifier.chars().all(|c| c.is_ascii_digit()) => format!("#{identifier}"),
            None => identifier.to_string(),
        }
    }
}

pub(crate) fn teams_from_reader<R: Read>(rdr: R) -> Result<TeamDirectory, csv::Error> {
    let mut directory = TeamDirectory::new();
    for row in read_rows(rdr)? {
        let (Some(number), Some(name)) = (row.first(), row.get(1)) else {
            continue;
        };
        if !directory.insert(number, name) && !number.is_empty() && !name.is_empty() {
            debug!("ignoring duplicate team number {}", number);
        }
    }
    Ok(directory)
}

/// Parse a team directory from CSV text already in memory.
pub fn parse_teams(text: &str) -> Result<TeamDirectory, csv::Error> {
    teams_from_reader(text.as_bytes())
}

/// Load a team directory from a `number,name` CSV file.
pub fn load_teams(path: &Path) -> Result<TeamDirectory, TeamsError> {
    let file = std::fs::File::open(path).map_err(|e| TeamsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    teams_from_reader(file).map_err(|e| TeamsError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
