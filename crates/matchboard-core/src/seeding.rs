// Elimination bracket seeding: ranked teams -> 3-lane head-to-head matches.
//
// Each match pairs three "low" seeds with three "high" seeds, one pair per
// lane, so that the best remaining team meets the worst remaining team:
//
//   match 1: 1 v 30 | 2 v 29 | 3 v 28
//   match 2: 4 v 27 | 5 v 26 | 6 v 25
//   ...
//   match 5: 13 v 18 | 14 v 17 | 15 v 16

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Lane, Match, Slot, SlotEntry};
use crate::rankings::RankedCompetitor;

/// Teams needed to fill one match (three lanes, two slots each).
pub const TEAMS_PER_MATCH: usize = 6;

/// Number of blank matches the finals stage starts with.
pub const FINALS_MATCH_COUNT: usize = 2;

/// Hardcoded bracket in rank numbers, slot order R1, R2, G1, G2, B1, B2.
pub const FIXED_TABLE: [[u32; TEAMS_PER_MATCH]; 5] = [
    [1, 30, 2, 29, 3, 28],
    [4, 27, 5, 26, 6, 25],
    [7, 24, 8, 23, 9, 22],
    [10, 21, 11, 20, 12, 19],
    [13, 18, 14, 17, 15, 16],
];

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How rankings are turned into matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingStrategy {
    /// Pair by position in the rank-sorted list. Scales with the number of
    /// teams; match numbers are always 1..=n.
    #[default]
    Computed,
    /// Use [`FIXED_TABLE`]. A match is emitted only when all six of its ranks
    /// are present; skipped matches leave gaps in the numbering.
    FixedTable,
}

impl fmt::Display for SeedingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedingStrategy::Computed => f.write_str("computed"),
            SeedingStrategy::FixedTable => f.write_str("fixed_table"),
        }
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate elimination matches from a ranking list.
///
/// Entries without a name or number are ignored. With fewer than six valid
/// entries the result is empty, which callers treat as "not ready yet".
/// The function is pure: the same input always yields the same matches.
pub fn generate_matches(rankings: &[RankedCompetitor], strategy: SeedingStrategy) -> Vec<Match> {
    let valid: Vec<&RankedCompetitor> = rankings.iter().filter(|r| r.is_valid()).collect();
    if valid.len() < TEAMS_PER_MATCH {
        debug!(
            "only {} valid rankings, need {} for an elimination match",
            valid.len(),
            TEAMS_PER_MATCH
        );
        return Vec::new();
    }

    let matches = match strategy {
        SeedingStrategy::Computed => computed(valid),
        SeedingStrategy::FixedTable => fixed_table(&valid),
    };
    debug!(
        "seeded {} elimination matches from {} rankings ({})",
        matches.len(),
        rankings.len(),
        strategy
    );
    matches
}

fn computed(mut valid: Vec<&RankedCompetitor>) -> Vec<Match> {
    valid.sort_by_key(|r| r.rank);
    let total = valid.len();
    let match_count = total / TEAMS_PER_MATCH;

    (0..match_count)
        .map(|i| {
            let offset = i * 3;
            let mut m = Match::blank(i as u32 + 1);
            for lane in Lane::ALL {
                let low = offset + lane.index();
                let high = total - 1 - low;
                let [first, second] = lane.slots();
                m.set_entry(first, seed_entry(valid[low]));
                m.set_entry(second, seed_entry(valid[high]));
            }
            m
        })
        .collect()
}

fn fixed_table(valid: &[&RankedCompetitor]) -> Vec<Match> {
    let by_rank = |rank: u32| valid.iter().copied().find(|r| r.rank == rank);

    let mut matches = Vec::new();
    for (i, ranks) in FIXED_TABLE.iter().enumerate() {
        let seeds: Option<Vec<&RankedCompetitor>> = ranks.iter().map(|&r| by_rank(r)).collect();
        let Some(seeds) = seeds else {
            debug!("skipping bracket match {}: not every seeded rank is present", i + 1);
            continue;
        };
        let mut m = Match::blank(i as u32 + 1);
        for (slot, seed) in Slot::ALL.into_iter().zip(seeds) {
            m.set_entry(slot, seed_entry(seed));
        }
        matches.push(m);
    }
    matches
}

fn seed_entry(competitor: &RankedCompetitor) -> SlotEntry {
    SlotEntry::seeded(competitor.identifier(), competitor.rank)
}

/// `count` blank matches numbered 0, used to start the manually entered
/// finals stage.
pub fn create_empty_match_template(count: usize) -> Vec<Match> {
    vec![Match::blank(0); count]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
