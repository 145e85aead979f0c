//! Points table derived from the match list.
//!
//! A win is worth 2 points and a draw 1. Only matches with both score fields
//! filled in are counted, but every team named in any match gets a row.

use crate::parse::int_or_zero;
use crate::{Match, StandingsRow};
use std::cmp::Ordering;
use std::collections::HashMap;

const WIN_POINTS: u32 = 2;
const DRAW_POINTS: u32 = 1;

/// Ordering among teams on equal points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Case-insensitive team name, then exact name.
    #[default]
    TeamName,
    /// Order in which the team first appears in the match list.
    ///
    /// The legacy app listed integer-like names ("1", "2") ahead of all
    /// others in ascending numeric order; this policy does not.
    FirstSeen,
}

pub fn compute_standings(matches: &[Match]) -> Vec<StandingsRow> {
    compute_standings_with(matches, TieBreak::default())
}

pub fn compute_standings_with(matches: &[Match], tie_break: TieBreak) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in matches {
        let home = slot(&mut rows, &mut index, &m.home_name);
        let away = slot(&mut rows, &mut index, &m.away_name);

        if !m.is_played() {
            continue;
        }

        let home_goals = int_or_zero(&m.home_score);
        let away_goals = int_or_zero(&m.away_score);
        rows[home].played += 1;
        rows[away].played += 1;

        match home_goals.cmp(&away_goals) {
            Ordering::Greater => record_win(&mut rows, home, away),
            Ordering::Less => record_win(&mut rows, away, home),
            Ordering::Equal => {
                for i in [home, away] {
                    rows[i].pts += DRAW_POINTS;
                    rows[i].draws += 1;
                }
            }
        }
    }

    // `rows` is in first-seen order here; the sort is stable.
    match tie_break {
        TieBreak::FirstSeen => rows.sort_by(|a, b| b.pts.cmp(&a.pts)),
        TieBreak::TeamName => rows.sort_by(|a, b| {
            b.pts
                .cmp(&a.pts)
                .then_with(|| a.team.to_lowercase().cmp(&b.team.to_lowercase()))
                .then_with(|| a.team.cmp(&b.team))
        }),
    }
    rows
}

/// Row index for `name`, creating a zeroed row on first sight.
fn slot<'a>(rows: &mut Vec<StandingsRow>, index: &mut HashMap<&'a str, usize>, name: &'a str) -> usize {
    *index.entry(name).or_insert_with(|| {
        rows.push(StandingsRow::new(name));
        rows.len() - 1
    })
}

fn record_win(rows: &mut [StandingsRow], winner: usize, loser: usize) {
    rows[winner].pts += WIN_POINTS;
    rows[winner].wins += 1;
    rows[loser].losses += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogoRef;

    fn fixture(home: &str, away: &str, home_score: &str, away_score: &str) -> Match {
        Match {
            id: format!("{home}-{away}"),
            home_logo: LogoRef("h".into()),
            away_logo: LogoRef("a".into()),
            home_name: home.into(),
            away_name: away.into(),
            home_score: home_score.into(),
            away_score: away_score.into(),
        }
    }

    fn row<'a>(table: &'a [StandingsRow], team: &str) -> &'a StandingsRow {
        table.iter().find(|r| r.team == team).unwrap()
    }

    #[test]
    fn win_and_draw_example() {
        let table = compute_standings(&[fixture("A", "B", "2", "1"), fixture("B", "C", "1", "1")]);
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].team, "A");

        let a = row(&table, "A");
        assert_eq!((a.played, a.wins, a.draws, a.losses, a.pts), (1, 1, 0, 0, 2));
        let b = row(&table, "B");
        assert_eq!((b.played, b.wins, b.draws, b.losses, b.pts), (2, 0, 1, 1, 1));
        let c = row(&table, "C");
        assert_eq!((c.played, c.wins, c.draws, c.losses, c.pts), (1, 0, 1, 0, 1));
    }

    #[test]
    fn unplayed_matches_still_list_both_teams() {
        let table = compute_standings(&[
            fixture("A", "B", "", ""),
            fixture("C", "D", "3", ""),
            fixture("E", "F", "", "0"),
        ]);
        assert_eq!(table.len(), 6);
        assert!(table.iter().all(|r| *r == StandingsRow::new(r.team.clone())));
    }

    #[test]
    fn unparsable_scores_count_as_zero() {
        let table = compute_standings(&[fixture("A", "B", "abc", "0"), fixture("A", "C", "x", "1")]);
        let a = row(&table, "A");
        assert_eq!((a.played, a.draws, a.losses, a.pts), (2, 1, 1, 1));
        assert_eq!(row(&table, "C").wins, 1);
    }

    #[test]
    fn invariants_hold_on_a_busy_table() {
        let names = ["A", "B", "C", "D"];
        let scores = ["0", "1", "2", "", "3x", " 1"];
        let mut matches = Vec::new();
        for (i, home) in names.iter().enumerate() {
            for (j, away) in names.iter().enumerate() {
                if i != j {
                    matches.push(fixture(home, away, scores[(i + j) % 6], scores[(i * 2 + j) % 6]));
                }
            }
        }
        let table = compute_standings(&matches);
        for r in &table {
            assert_eq!(r.played, r.wins + r.draws + r.losses, "{r:?}");
            assert_eq!(r.pts, 2 * r.wins + r.draws, "{r:?}");
        }
        assert!(table.windows(2).all(|w| w[0].pts >= w[1].pts));
    }

    #[test]
    fn tie_break_policies() {
        let matches = [fixture("Zebras", "Ants", "1", "1"), fixture("bees", "Moths", "", "")];

        let by_name: Vec<_> = compute_standings(&matches).into_iter().map(|r| r.team).collect();
        assert_eq!(by_name, ["Ants", "Zebras", "bees", "Moths"]);

        let by_seen: Vec<_> = compute_standings_with(&matches, TieBreak::FirstSeen)
            .into_iter()
            .map(|r| r.team)
            .collect();
        assert_eq!(by_seen, ["Zebras", "Ants", "bees", "Moths"]);
    }

    #[test]
    fn rows_serialize_with_table_headings() {
        let table = compute_standings(&[fixture("A", "B", "1", "0")]);
        let json = serde_json::to_value(&table[0]).unwrap();
        assert_eq!(json, serde_json::json!({"team":"A","pts":2,"W":1,"D":0,"L":0,"P":1}));
    }
}
