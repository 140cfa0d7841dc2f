// Shared lane formatting: colours and "team vs team" lines.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use matchboard_core::model::{Lane, Match, SlotEntry};
use matchboard_core::teams::TeamDirectory;

/// Shown for an empty slot.
pub const TBD: &str = "TBD";

pub fn lane_color(lane: Lane) -> Color {
    match lane {
        Lane::Red => Color::Red,
        Lane::Green => Color::Green,
        Lane::Blue => Color::Blue,
    }
}

/// Display text for one slot: team name (or number) plus the seed, if any.
pub fn entry_label(teams: &TeamDirectory, entry: &SlotEntry) -> String {
    if entry.is_empty() {
        return TBD.to_string();
    }
    let name = teams.display(&entry.team);
    match entry.rank {
        Some(rank) => format!("({rank}) {name}"),
        None => name,
    }
}

/// One line per visible lane: `RED  Team A  vs  Team B`.
pub fn lane_line(teams: &TeamDirectory, m: &Match, lane: Lane, bold: bool) -> Line<'static> {
    let (first, second) = m.lane(lane);
    let mut team_style = Style::default().fg(Color::White);
    if bold {
        team_style = team_style.add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(
            format!("{:<6}", lane.display_str().to_uppercase()),
            Style::default()
                .fg(lane_color(lane))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(entry_label(teams, first), team_style),
        Span::styled("  vs  ", Style::default().fg(Color::Gray)),
        Span::styled(entry_label(teams, second), team_style),
    ])
}

/// Card title: `Match 12 - 9:40`.
pub fn match_title(m: &Match) -> String {
    match m.time.as_deref() {
        Some(time) => format!("Match {} - {}", m.number, time),
        None if m.number == 0 => "Match".to_string(),
        None => format!("Match {}", m.number),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use matchboard_core::model::Slot;
    use matchboard_core::teams::parse_teams;

    #[test]
    fn empty_slot_is_tbd() {
        let teams = TeamDirectory::new();
        assert_eq!(entry_label(&teams, &SlotEntry::default()), "TBD");
    }

    #[test]
    fn seeded_slot_shows_rank_and_name() {
        let teams = parse_teams("254,Cheesy Poofs\n").unwrap();
        assert_eq!(entry_label(&teams, &SlotEntry::seeded("254", 1)), "(1) Cheesy Poofs");
        assert_eq!(entry_label(&teams, &SlotEntry::seeded("99", 4)), "(4) #99");
    }

    #[test]
    fn lane_line_pairs_the_lane() {
        let teams = TeamDirectory::new();
        let m = Match::with_teams(3, ["a", "b", "c", "d", "e", "f"]);
        let line = lane_line(&teams, &m, Lane::Green, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, format!("GREEN {}  vs  {}", m.team(Slot::G1), m.team(Slot::G2)));
        assert_eq!(line.spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn titles() {
        let mut m = Match::blank(7);
        assert_eq!(match_title(&m), "Match 7");
        m.time = Some("10:20".into());
        assert_eq!(match_title(&m), "Match 7 - 10:20");
        assert_eq!(match_title(&Match::blank(0)), "Match");
    }
}
