//! Leaderboard sort controller.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Contestant;

/// Sortable leaderboard column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortColumn {
    #[serde(rename = "Bot")]
    Bot,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "Races")]
    Races,
    #[serde(rename = "Avg Position")]
    AvgPosition,
}

impl SortColumn {
    /// Columns in display order.
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Bot,
        SortColumn::Usd,
        SortColumn::Races,
        SortColumn::AvgPosition,
    ];

    /// Header label.
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Bot => "Bot",
            SortColumn::Usd => "USD",
            SortColumn::Races => "Races",
            SortColumn::AvgPosition => "Avg Position",
        }
    }

    /// Ascending comparison of two contestants on this column.
    pub fn compare(&self, a: &Contestant, b: &Contestant) -> Ordering {
        match self {
            SortColumn::Bot => a.name.cmp(&b.name),
            SortColumn::Usd => a.earnings.total_cmp(&b.earnings),
            SortColumn::Races => a.races.cmp(&b.races),
            SortColumn::AvgPosition => a.average_position().total_cmp(&b.average_position()),
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    /// Accepts header labels and their snake_case forms, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "bot" => Ok(SortColumn::Bot),
            "usd" => Ok(SortColumn::Usd),
            "races" => Ok(SortColumn::Races),
            "avg position" => Ok(SortColumn::AvgPosition),
            _ => Err(format!(
                "Unknown sort column: {} (expected Bot, USD, Races or Avg Position)",
                s
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Header indicator for the active column.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {} (expected asc or desc)", s)),
        }
    }
}

/// Active column and direction. Starts on USD, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Usd,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    pub fn new(column: SortColumn, order: SortOrder) -> Self {
        Self { column, order }
    }

    /// Sort requested by column and/or direction. A column without a
    /// direction sorts ascending, as a click on an inactive header would.
    pub fn from_parts(column: Option<SortColumn>, order: Option<SortOrder>) -> Self {
        let default = Self::default();
        match (column, order) {
            (Some(column), Some(order)) => Self::new(column, order),
            (Some(column), None) => Self::new(column, SortOrder::Asc),
            (None, Some(order)) => Self::new(default.column, order),
            (None, None) => default,
        }
    }

    /// Header click: flip direction on the active column, otherwise switch
    /// to `column` ascending.
    pub fn click(&mut self, column: SortColumn) {
        if self.column == column {
            self.order = self.order.toggled();
        } else {
            self.column = column;
            self.order = SortOrder::Asc;
        }
    }

    /// Stable sort of `contestants` in place.
    ///
    /// Contestants that compare equal keep their current relative order in
    /// both directions.
    pub fn apply(&self, contestants: &mut [Contestant]) {
        let column = self.column;
        match self.order {
            SortOrder::Asc => contestants.sort_by(|a, b| column.compare(a, b)),
            SortOrder::Desc => contestants.sort_by(|a, b| column.compare(b, a)),
        }
    }
}
