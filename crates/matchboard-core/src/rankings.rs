// Team rankings: the competitor type fed to the seeder and the rankings CSV loader.
//
// Two CSV layouts are accepted. The "template" export has a header whose
// 10th column is the robot game rank; team number and name are columns 1 and
// 2. Anything else is read as the legacy layout of 1-3 columns per line:
// `rank,name,number`, `rank,name`, or just `name`.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::rows::read_rows;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One team's standing after the qualifying rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCompetitor {
    /// Standing, 1 = best.
    pub rank: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl RankedCompetitor {
    pub fn new(rank: u32, name: impl Into<String>) -> Self {
        RankedCompetitor {
            rank,
            name: name.into(),
            number: None,
        }
    }

    pub fn with_number(rank: u32, name: impl Into<String>, number: impl Into<String>) -> Self {
        RankedCompetitor {
            rank,
            name: name.into(),
            number: Some(number.into()),
        }
    }

    /// A competitor counts only when it has a name or a number.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() || self.number_str().is_some()
    }

    /// The value placed into a lane slot: the team number when present,
    /// otherwise the team name.
    pub fn identifier(&self) -> &str {
        self.number_str().unwrap_or(self.name.trim())
    }

    fn number_str(&self) -> Option<&str> {
        self.number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RankingsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Column (0-based) holding the robot game rank in the template layout.
const TEMPLATE_RANK_COLUMN: usize = 9;

/// Parse a rank cell. Zero and non-numeric values are treated as absent.
pub(crate) fn parse_rank(cell: &str) -> Option<u32> {
    cell.trim().parse::<u32>().ok().filter(|r| *r > 0)
}

fn is_template_header(row: &[String]) -> bool {
    row.len() > TEMPLATE_RANK_COLUMN
        && row[TEMPLATE_RANK_COLUMN]
            .to_lowercase()
            .contains("game rank")
}

fn parse_template(rows: &[Vec<String>]) -> Vec<RankedCompetitor> {
    let mut rankings = Vec::new();
    for row in rows.iter().skip(1) {
        if row.len() <= TEMPLATE_RANK_COLUMN {
            warn!("skipping template row with {} columns", row.len());
            continue;
        }
        let Some(rank) = parse_rank(&row[TEMPLATE_RANK_COLUMN]) else {
            debug!("skipping team '{}' without a robot game rank", row[1]);
            continue;
        };
        rankings.push(RankedCompetitor::with_number(rank, row[1].clone(), row[0].clone()));
    }
    rankings
}

fn parse_legacy(rows: &[Vec<String>]) -> Vec<RankedCompetitor> {
    let mut rankings: Vec<RankedCompetitor> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if i == 0 && row[0].parse::<u32>().is_err() {
            // Header line, e.g. "Rank,Team Name,Team Number"
            continue;
        }

        let next_rank = rankings.len() as u32 + 1;
        let competitor = match row.as_slice() {
            [rank, name, number, ..] => RankedCompetitor {
                rank: parse_rank(rank).unwrap_or(next_rank),
                name: name.clone(),
                number: Some(number.clone()).filter(|n| !n.is_empty()),
            },
            [rank, name] => RankedCompetitor::new(parse_rank(rank).unwrap_or(next_rank), name.clone()),
            [name] => RankedCompetitor::new(next_rank, name.clone()),
            [] => continue,
        };
        rankings.push(competitor);
    }
    rankings
}

/// Sort by rank (stable, so ties keep file order) and renumber 1..=n.
fn normalize(mut rankings: Vec<RankedCompetitor>) -> Vec<RankedCompetitor> {
    rankings.sort_by_key(|r| r.rank);
    for (i, r) in rankings.iter_mut().enumerate() {
        r.rank = i as u32 + 1;
    }
    rankings
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

pub(crate) fn rankings_from_reader<R: Read>(rdr: R) -> Result<Vec<RankedCompetitor>, csv::Error> {
    let rows = read_rows(rdr)?;
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let rankings = if is_template_header(first) {
        debug!("rankings CSV recognised as template export");
        parse_template(&rows)
    } else {
        debug!("rankings CSV read as legacy layout");
        parse_legacy(&rows)
    };

    Ok(normalize(rankings))
}

/// Parse rankings from CSV text already in memory.
pub fn parse_rankings(text: &str) -> Result<Vec<RankedCompetitor>, csv::Error> {
    rankings_from_reader(text.as_bytes())
}

/// Load rankings from a CSV file. Ranks in the result are sequential from 1.
pub fn load_rankings(path: &Path) -> Result<Vec<RankedCompetitor>, RankingsError> {
    let file = std::fs::File::open(path).map_err(|e| RankingsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    rankings_from_reader(file).map_err(|e| RankingsError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<RankedCompetitor> {
        parse_rankings(text).expect("should parse")
    }

    #[test]
    fn identifier_prefers_number() {
        let r = RankedCompetitor::with_number(1, "Robo Raptors", "1234");
        assert_eq!(r.identifier(), "1234");
        let r = RankedCompetitor::with_number(1, "Robo Raptors", "  ");
        assert_eq!(r.identifier(), "Robo Raptors");
        let r = RankedCompetitor::new(2, "Gearheads");
        assert_eq!(r.identifier(), "Gearheads");
    }

    #[test]
    fn validity_needs_name_or_number() {
        assert!(RankedCompetitor::new(1, "Alpha").is_valid());
        assert!(RankedCompetitor::with_number(1, "", "42").is_valid());
        assert!(!RankedCompetitor::new(1, "   ").is_valid());
        assert!(!RankedCompetitor::with_number(1, "", "").is_valid());
    }

    #[test]
    fn template_format_uses_tenth_column() {
        let text = "\
Team number,Team name,c3,c4,c5,c6,c7,c8,c9,Robot game rank
101,Bots,x,x,x,x,x,x,x,2
102,Cogs,x,x,x,x,x,x,x,1
103,Unranked,x,x,x,x,x,x,x,0
104,Blank,x,x,x,x,x,x,x,
105,Short,x
";
        let rankings = parse(text);
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0], RankedCompetitor::with_number(1, "Cogs", "102"));
        assert_eq!(rankings[1], RankedCompetitor::with_number(2, "Bots", "101"));
    }

    #[test]
    fn template_ranks_are_renumbered() {
        let text = "\
num,name,a,b,c,d,e,f,g,ROBOT GAME RANK (final)
7,Seven,,,,,,,,10
8,Eight,,,,,,,,4
";
        let rankings = parse(text);
        assert_eq!(rankings[0].name, "Eight");
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[1].name, "Seven");
        assert_eq!(rankings[1].rank, 2);
    }

    #[test]
    fn legacy_three_columns_with_header() {
        let text = "Rank,Name,Number\n2,Bravo,22\n1,Alpha,11\n";
        let rankings = parse(text);
        assert_eq!(
            rankings,
            vec![
                RankedCompetitor::with_number(1, "Alpha", "11"),
                RankedCompetitor::with_number(2, "Bravo", "22"),
            ]
        );
    }

    #[test]
    fn legacy_two_columns_without_header() {
        let rankings = parse("3,Charlie\n1,Alpha\n2,Bravo\n");
        let names: Vec<&str> = rankings.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
        assert!(rankings.iter().all(|r| r.number.is_none()));
    }

    #[test]
    fn legacy_name_only_gets_sequential_ranks() {
        // A first line that is not a number is a header, even in the
        // name-only layout.
        let rankings = parse("Teams\nAlpha\nBravo\n\nCharlie\n");
        let ranks: Vec<(u32, &str)> = rankings.iter().map(|r| (r.rank, r.name.as_str())).collect();
        assert_eq!(ranks, vec![(1, "Alpha"), (2, "Bravo"), (3, "Charlie")]);
    }

    #[test]
    fn legacy_unparsable_rank_falls_back_to_position() {
        let rankings = parse("1,Alpha\nx,Bravo\n0,Charlie\n");
        // Bravo gets 2, Charlie gets 3, then normalisation keeps that order.
        let names: Vec<&str> = rankings.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn ties_keep_file_order() {
        let rankings = parse("1,First\n1,Second\n");
        assert_eq!(rankings[0].name, "First");
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[1].name, "Second");
        assert_eq!(rankings[1].rank, 2);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }

    #[test]
    fn load_rankings_missing_file_is_io_error() {
        let err = load_rankings(Path::new("/nonexistent/rankings.csv")).unwrap_err();
        assert!(matches!(err, RankingsError::Io { .. }));
    }
}
