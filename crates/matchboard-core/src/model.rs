// Match, lane, and slot types shared by the loaders, the seeder, and the board.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Lane
// ---------------------------------------------------------------------------

/// One of the three lanes of a match. Each lane is a physical table hosting
/// two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Red,
    Green,
    Blue,
}

impl Lane {
    /// Lanes in display order.
    pub const ALL: [Lane; 3] = [Lane::Red, Lane::Green, Lane::Blue];

    /// Zero-based position of the lane in display order.
    pub fn index(self) -> usize {
        match self {
            Lane::Red => 0,
            Lane::Green => 1,
            Lane::Blue => 2,
        }
    }

    /// The two slots of this lane, position 1 first.
    pub fn slots(self) -> [Slot; 2] {
        match self {
            Lane::Red => [Slot::R1, Slot::R2],
            Lane::Green => [Slot::G1, Slot::G2],
            Lane::Blue => [Slot::B1, Slot::B2],
        }
    }

    pub fn display_str(self) -> &'static str {
        match self {
            Lane::Red => "Red",
            Lane::Green => "Green",
            Lane::Blue => "Blue",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// A (lane, position) pair. Declaration order is the canonical slot order
/// used everywhere: R1, R2, G1, G2, B1, B2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    R1,
    R2,
    G1,
    G2,
    B1,
    B2,
}

impl Slot {
    pub const ALL: [Slot; 6] = [Slot::R1, Slot::R2, Slot::G1, Slot::G2, Slot::B1, Slot::B2];

    pub fn index(self) -> usize {
        match self {
            Slot::R1 => 0,
            Slot::R2 => 1,
            Slot::G1 => 2,
            Slot::G2 => 3,
            Slot::B1 => 4,
            Slot::B2 => 5,
        }
    }

    /// Slot at a canonical index (0..6), e.g. a grid column.
    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }

    pub fn lane(self) -> Lane {
        match self {
            Slot::R1 | Slot::R2 => Lane::Red,
            Slot::G1 | Slot::G2 => Lane::Green,
            Slot::B1 | Slot::B2 => Lane::Blue,
        }
    }

    /// Position within the lane: 1 or 2.
    pub fn position(self) -> u8 {
        match self {
            Slot::R1 | Slot::G1 | Slot::B1 => 1,
            Slot::R2 | Slot::G2 | Slot::B2 => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::R1 => "R1",
            Slot::R2 => "R2",
            Slot::G1 => "G1",
            Slot::G2 => "G2",
            Slot::B1 => "B1",
            Slot::B2 => "B2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// Contents of one slot: the team identifier (empty when unassigned) and,
/// for seeded matches, the rank that filled it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl SlotEntry {
    pub fn seeded(team: impl Into<String>, rank: u32) -> Self {
        SlotEntry {
            team: team.into(),
            rank: Some(rank),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.team.trim().is_empty()
    }
}

/// A single match: six teams spread over three lanes.
///
/// Qualifier matches come from the schedule CSV and may carry a start time.
/// Elimination matches come from the seeder and carry ranks. Finals matches
/// start as blank templates with number 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    entries: [SlotEntry; 6],
}

impl Match {
    /// A match with every slot empty.
    pub fn blank(number: u32) -> Self {
        Match {
            number,
            ..Match::default()
        }
    }

    /// Build a match from team identifiers given in canonical slot order.
    pub fn with_teams(number: u32, teams: [&str; 6]) -> Self {
        let mut m = Match::blank(number);
        for (slot, team) in Slot::ALL.into_iter().zip(teams) {
            m.set_team(slot, team);
        }
        m
    }

    pub fn entry(&self, slot: Slot) -> &SlotEntry {
        &self.entries[slot.index()]
    }

    pub fn team(&self, slot: Slot) -> &str {
        &self.entries[slot.index()].team
    }

    pub fn rank(&self, slot: Slot) -> Option<u32> {
        self.entries[slot.index()].rank
    }

    /// Replace the whole entry for a slot.
    pub fn set_entry(&mut self, slot: Slot, entry: SlotEntry) {
        self.entries[slot.index()] = entry;
    }

    /// Set the team for a slot, dropping any rank badge it carried.
    pub fn set_team(&mut self, slot: Slot, team: impl Into<String>) {
        self.entries[slot.index()] = SlotEntry {
            team: team.into(),
            rank: None,
        };
    }

    /// Entries in canonical slot order.
    pub fn entries(&self) -> impl Iterator<Item = (Slot, &SlotEntry)> {
        Slot::ALL.into_iter().map(move |slot| (slot, self.entry(slot)))
    }

    /// The two teams of a lane, position 1 first.
    pub fn lane(&self, lane: Lane) -> (&SlotEntry, &SlotEntry) {
        let [a, b] = lane.slots();
        (self.entry(a), self.entry(b))
    }

    /// True when no slot has a team assigned.
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(SlotEntry::is_empty)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
