//! Race result records as published in the yearly race files.

use serde::{Deserialize, Serialize};

/// Placement category within a single race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "winner")]
    Winner,
    A,
    B,
    C,
}

impl Tier {
    /// All tiers, highest first. Finishing positions are assigned in this order.
    pub const ALL: [Tier; 4] = [Tier::Winner, Tier::A, Tier::B, Tier::C];

    /// Key used for this tier in the race files.
    pub fn key(&self) -> &'static str {
        match self {
            Tier::Winner => "winner",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        }
    }

    /// Human label for the detail panel.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Winner => "Winner",
            Tier::A => "A Rank",
            Tier::B => "B Rank",
            Tier::C => "C Rank",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Prize money per tier. Tier C is never paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    #[serde(default)]
    pub winner: f64,

    #[serde(rename = "A", default)]
    pub a: f64,

    #[serde(rename = "B", default)]
    pub b: f64,
}

impl Prize {
    /// Amount paid to each entrant placed in `tier`.
    pub fn amount(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Winner => self.winner,
            Tier::A => self.a,
            Tier::B => self.b,
            Tier::C => 0.0,
        }
    }
}

/// Results of one race. Missing tiers deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceData {
    #[serde(default)]
    pub winner: Vec<String>,

    #[serde(rename = "A", default)]
    pub a: Vec<String>,

    #[serde(rename = "B", default)]
    pub b: Vec<String>,

    #[serde(rename = "C", default)]
    pub c: Vec<String>,

    #[serde(default)]
    pub prize: Prize,
}

/// A single finisher of a race with its derived position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finish<'a> {
    pub bot: &'a str,
    pub tier: Tier,
    /// 1-based finishing position within the race.
    pub position: u32,
    pub prize: f64,
}

impl RaceData {
    /// Entrants placed in `tier`, in finishing order.
    pub fn tier(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Winner => &self.winner,
            Tier::A => &self.a,
            Tier::B => &self.b,
            Tier::C => &self.c,
        }
    }

    /// Total number of placements across all tiers.
    pub fn finisher_count(&self) -> usize {
        Tier::ALL.iter().map(|t| self.tier(*t).len()).sum()
    }

    /// Every placement in the race, highest tier first.
    ///
    /// Positions run 1..=finisher_count: each tier starts after all the
    /// entrants of the tiers above it. An entrant listed in several tiers
    /// gets one finish per listing.
    pub fn finishes(&self) -> Vec<Finish<'_>> {
        let mut finishes = Vec::with_capacity(self.finisher_count());
        let mut offset = 0u32;

        for tier in Tier::ALL {
            let bots = self.tier(tier);
            for (idx, bot) in bots.iter().enumerate() {
                finishes.push(Finish {
                    bot: bot.as_str(),
                    tier,
                    position: 1 + offset + idx as u32,
                    prize: self.prize.amount(tier),
                });
            }
            offset += bots.len() as u32;
        }

        finishes
    }
}

/// One entry of a race file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceRecord {
    pub data: RaceData,
}

impl RaceRecord {
    pub fn new(data: RaceData) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RaceData {
        RaceData {
            winner: vec!["Ana".to_string()],
            a: vec!["Bo".to_string(), "Cy".to_string()],
            b: vec![],
            c: vec!["Di".to_string()],
            prize: Prize {
                winner: 100.0,
                a: 10.0,
                b: 5.0,
            },
        }
    }

    #[test]
    fn test_finishes_positions_are_contiguous() {
        let race = sample();
        let positions: Vec<(&str, u32)> =
            race.finishes().iter().map(|f| (f.bot, f.position)).collect();

        assert_eq!(positions, vec![("Ana", 1), ("Bo", 2), ("Cy", 3), ("Di", 4)]);
    }

    #[test]
    fn test_finishes_prize_per_tier() {
        let race = sample();
        let prizes: Vec<f64> = race.finishes().iter().map(|f| f.prize).collect();

        assert_eq!(prizes, vec![100.0, 10.0, 10.0, 0.0]);
    }

    #[test]
    fn test_multiple_winners_do_not_share_a_position() {
        let race = RaceData {
            winner: vec!["Ana".to_string(), "Bo".to_string()],
            a: vec!["Cy".to_string()],
            ..Default::default()
        };
        let positions: Vec<u32> = race.finishes().iter().map(|f| f.position).collect();

        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_prize_tier_c_is_unpaid() {
        let prize = Prize {
            winner: 1.0,
            a: 2.0,
            b: 3.0,
        };
        assert_eq!(prize.amount(Tier::C), 0.0);
        assert_eq!(prize.amount(Tier::B), 3.0);
    }

    #[test]
    fn test_deserialize_race_record() {
        let json = r#"{"data":{"winner":["Ana"],"A":["Bo"],"B":["Cy"],"C":[],"prize":{"winner":50,"A":20.5,"B":1}}}"#;
        let record: RaceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.data.winner, vec!["Ana"]);
        assert_eq!(record.data.a, vec!["Bo"]);
        assert_eq!(record.data.prize.a, 20.5);
        assert_eq!(record.data.finisher_count(), 3);
    }

    #[test]
    fn test_missing_tiers_and_prize_default_to_empty() {
        let json = r#"{"data":{"winner":["Ana"]}}"#;
        let record: RaceRecord = serde_json::from_str(json).unwrap();

        assert!(record.data.a.is_empty());
        assert!(record.data.c.is_empty());
        assert_eq!(record.data.prize, Prize::default());
    }

    #[test]
    fn test_tier_serde_keys() {
        assert_eq!(serde_json::to_string(&Tier::Winner).unwrap(), "\"winner\"");
        assert_eq!(serde_json::to_string(&Tier::A).unwrap(), "\"A\"");
        assert_eq!(Tier::C.label(), "C Rank");
    }
}
