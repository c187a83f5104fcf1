//! Per-entrant placement counts for one year.

use serde::{Deserialize, Serialize};

use super::Tier;

/// How often an entrant placed in each tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStat {
    pub bot: String,
    pub winner: u32,

    #[serde(rename = "A")]
    pub a: u32,

    #[serde(rename = "B")]
    pub b: u32,

    #[serde(rename = "C")]
    pub c: u32,
}

impl BotStat {
    /// A zeroed stat for `bot`.
    pub fn new(bot: impl Into<String>) -> Self {
        Self {
            bot: bot.into(),
            ..Default::default()
        }
    }

    /// Count one more placement in `tier`.
    pub fn increment(&mut self, tier: Tier) {
        match tier {
            Tier::Winner => self.winner += 1,
            Tier::A => self.a += 1,
            Tier::B => self.b += 1,
            Tier::C => self.c += 1,
        }
    }

    pub fn count(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Winner => self.winner,
            Tier::A => self.a,
            Tier::B => self.b,
            Tier::C => self.c,
        }
    }

    /// Placements across all tiers.
    pub fn total(&self) -> u32 {
        self.winner + self.a + self.b + self.c
    }
}
