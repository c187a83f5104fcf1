//! All-time leaderboard entry.

use serde::{Deserialize, Serialize};

/// Cumulative results for one entrant across every race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contestant {
    /// Entrant identifier
    pub name: String,

    /// Sum of prize money over all placements
    pub earnings: f64,

    /// Number of placements
    pub races: u32,

    /// Finishing position of every placement, in aggregation order
    pub positions: Vec<u32>,
}

impl Contestant {
    /// A contestant with a single placement.
    pub fn new(name: impl Into<String>, earnings: f64, position: u32) -> Self {
        Self {
            name: name.into(),
            earnings,
            races: 1,
            positions: vec![position],
        }
    }

    /// Record another placement.
    pub fn add(&mut self, earnings: f64, position: u32) {
        self.earnings += earnings;
        self.races += 1;
        self.positions.push(position);
    }

    /// Mean finishing position. Zero when there are no placements.
    pub fn average_position(&self) -> f64 {
        if self.positions.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.positions.iter().map(|&p| p as u64).sum();
        sum as f64 / self.positions.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut c = Contestant::new("Ana", 100.0, 1);
        c.add(10.0, 3);
        c.add(0.0, 8);

        assert_eq!(c.races, 3);
        assert_eq!(c.earnings, 110.0);
        assert_eq!(c.positions, vec![1, 3, 8]);
        assert!((c.average_position() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_position_empty() {
        let c = Contestant {
            name: "Ghost".to_string(),
            earnings: 0.0,
            races: 0,
            positions: vec![],
        };
        assert_eq!(c.average_position(), 0.0);
    }
}
