//! Statistics calculation.
//!
//! Pure reductions over race records:
//! - Per-entrant tier counts for a year (bot statistics)
//! - All-time earnings, race counts and positions (leaderboard)
//! - Race-by-race history of one entrant (graph input)
//!
//! Every call builds its result from scratch; nothing is carried over
//! between calls.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{BotStat, Contestant, RaceRecord, Tier};

/// Count tier placements per entrant.
///
/// Entrants are returned in order of first appearance. An entrant listed in
/// several tiers of one race is counted once per listing.
pub fn bot_stats(records: &[RaceRecord]) -> Vec<BotStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<BotStat> = Vec::new();

    for race in records {
        for tier in Tier::ALL {
            for bot in race.data.tier(tier) {
                let slot = *index.entry(bot.as_str()).or_insert_with(|| {
                    stats.push(BotStat::new(bot.as_str()));
                    stats.len() - 1
                });
                stats[slot].increment(tier);
            }
        }
    }

    stats
}

/// A selectable entrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotOption {
    pub value: String,
    pub label: String,
}

/// Selectable entrants, sorted by identifier.
pub fn bot_options(stats: &[BotStat]) -> Vec<BotOption> {
    let mut names: Vec<&str> = stats.iter().map(|s| s.bot.as_str()).collect();
    names.sort_unstable();
    names
        .into_iter()
        .map(|name| BotOption {
            value: name.to_string(),
            label: name.to_string(),
        })
        .collect()
}

/// Aggregate all-time results per entrant.
///
/// Entrants are returned in order of first appearance.
pub fn contestants(records: &[RaceRecord]) -> Vec<Contestant> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut board: Vec<Contestant> = Vec::new();

    for race in records {
        for finish in race.data.finishes() {
            match index.get(finish.bot) {
                Some(&slot) => board[slot].add(finish.prize, finish.position),
                None => {
                    index.insert(finish.bot, board.len());
                    board.push(Contestant::new(finish.bot, finish.prize, finish.position));
                }
            }
        }
    }

    board
}

/// One race in an entrant's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RacePoint {
    /// 1-based index of the race within the record set
    pub race: usize,

    /// Best tier reached, if the entrant placed
    pub tier: Option<Tier>,

    /// Best finishing position, if the entrant placed
    pub position: Option<u32>,

    /// Number of placements in the race
    pub finishers: usize,
}

/// Race-by-race results of `bot`, one point per record in input order.
pub fn race_history(bot: &str, records: &[RaceRecord]) -> Vec<RacePoint> {
    records
        .iter()
        .enumerate()
        .map(|(i, race)| {
            let best = race.data.finishes().into_iter().find(|f| f.bot == bot);
            RacePoint {
                race: i + 1,
                tier: best.map(|f| f.tier),
                position: best.map(|f| f.position),
                finishers: race.data.finisher_count(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Prize, RaceData};
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn race(winner: &[&str], a: &[&str], b: &[&str], c: &[&str], prize: (f64, f64, f64)) -> RaceRecord {
        RaceRecord::new(RaceData {
            winner: names(winner),
            a: names(a),
            b: names(b),
            c: names(c),
            prize: Prize {
                winner: prize.0,
                a: prize.1,
                b: prize.2,
            },
        })
    }

    fn sample_race() -> RaceRecord {
        race(&["Ana"], &["Bo", "Cy"], &[], &["Di"], (100.0, 10.0, 5.0))
    }

    fn find<'a>(board: &'a [Contestant], name: &str) -> &'a Contestant {
        board.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_bot_stats_two_races() {
        let records = vec![
            race(&["Ana"], &["Bo"], &[], &[], (1.0, 0.0, 0.0)),
            race(&["Bo"], &["Ana"], &[], &["Cy"], (1.0, 0.0, 0.0)),
        ];
        let stats = bot_stats(&records);

        let ana = stats.iter().find(|s| s.bot == "Ana").unwrap();
        assert_eq!(
            ana,
            &BotStat {
                bot: "Ana".to_string(),
                winner: 1,
                a: 1,
                b: 0,
                c: 0,
            }
        );
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn test_bot_stats_counts_each_tier_listing() {
        let records = vec![race(&["Ana"], &["Ana"], &[], &["Ana"], (0.0, 0.0, 0.0))];
        let stats = bot_stats(&records);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].winner, 1);
        assert_eq!(stats[0].a, 1);
        assert_eq!(stats[0].c, 1);
    }

    #[test]
    fn test_bot_stats_case_sensitive() {
        let records = vec![race(&["ana"], &["Ana"], &[], &[], (0.0, 0.0, 0.0))];
        assert_eq!(bot_stats(&records).len(), 2);
    }

    #[test]
    fn test_bot_stats_empty() {
        assert!(bot_stats(&[]).is_empty());
    }

    #[test]
    fn test_bot_options_sorted() {
        let records = vec![race(&["Zed"], &["bob", "Amy"], &[], &[], (0.0, 0.0, 0.0))];
        let options = bot_options(&bot_stats(&records));
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();

        assert_eq!(values, vec!["Amy", "Zed", "bob"]);
        assert_eq!(options[0].label, "Amy");
    }

    #[test]
    fn test_contestants_single_race() {
        let board = contestants(&[sample_race()]);

        assert_eq!(find(&board, "Ana").positions, vec![1]);
        assert_eq!(find(&board, "Bo").positions, vec![2]);
        assert_eq!(find(&board, "Cy").positions, vec![3]);
        assert_eq!(find(&board, "Di").positions, vec![4]);

        assert_eq!(find(&board, "Ana").earnings, 100.0);
        assert_eq!(find(&board, "Bo").earnings, 10.0);
        assert_eq!(find(&board, "Cy").earnings, 10.0);
        assert_eq!(find(&board, "Di").earnings, 0.0);
    }

    #[test]
    fn test_contestants_accumulate_across_races() {
        let records = vec![
            sample_race(),
            race(&["Di"], &[], &["Ana"], &["Bo"], (50.0, 20.0, 7.5)),
        ];
        let board = contestants(&records);

        let ana = find(&board, "Ana");
        assert_eq!(ana.races, 2);
        assert_eq!(ana.earnings, 107.5);
        assert_eq!(ana.positions, vec![1, 2]);
        assert!((ana.average_position() - 1.5).abs() < f64::EPSILON);

        let di = find(&board, "Di");
        assert_eq!(di.races, 2);
        assert_eq!(di.earnings, 50.0);
        assert_eq!(di.positions, vec![4, 1]);
    }

    #[test]
    fn test_contestant_totals_match_appearances() {
        let records = vec![
            sample_race(),
            race(&["Bo"], &["Cy"], &["Ana", "Di"], &["Eve"], (30.0, 20.0, 10.0)),
            race(&["Cy"], &["Bo", "Ana"], &["Eve"], &[], (5.0, 4.0, 3.0)),
        ];
        let board = contestants(&records);

        for contestant in &board {
            let mut appearances = 0u32;
            let mut expected = 0.0;
            for r in &records {
                for tier in Tier::ALL {
                    let n = r.data.tier(tier).iter().filter(|b| **b == contestant.name).count();
                    appearances += n as u32;
                    expected += n as f64 * r.data.prize.amount(tier);
                }
            }
            assert_eq!(contestant.races, appearances, "{}", contestant.name);
            assert_eq!(contestant.positions.len() as u32, appearances);
            assert!((contestant.earnings - expected).abs() < 1e-9, "{}", contestant.name);
        }
    }

    #[test]
    fn test_positions_contiguous_per_race() {
        let r = race(&["A1", "A2"], &["B1"], &["C1", "C2", "C3"], &["D1"], (0.0, 0.0, 0.0));
        let mut positions: Vec<u32> = contestants(std::slice::from_ref(&r))
            .iter()
            .flat_map(|c| c.positions.clone())
            .collect();
        positions.sort_unstable();

        let expected: Vec<u32> = (1..=r.data.finisher_count() as u32).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_race_history() {
        let records = vec![
            sample_race(),
            race(&["Bo"], &[], &[], &["Eve"], (0.0, 0.0, 0.0)),
            race(&["Eve"], &["Cy"], &[], &[], (0.0, 0.0, 0.0)),
        ];
        let history = race_history("Cy", &records);

        assert_eq!(
            history,
            vec![
                RacePoint {
                    race: 1,
                    tier: Some(Tier::A),
                    position: Some(3),
                    finishers: 4,
                },
                RacePoint {
                    race: 2,
                    tier: None,
                    position: None,
                    finishers: 2,
                },
                RacePoint {
                    race: 3,
                    tier: Some(Tier::A),
                    position: Some(2),
                    finishers: 2,
                },
            ]
        );
    }
}
