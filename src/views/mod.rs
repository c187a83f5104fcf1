//! View state for the two dashboard tabs.
//!
//! - **bots**: per-year bot statistics with a selectable entrant
//! - **leaderboard**: all-time ranking with a sortable column set
//!
//! Rendering helpers (currency, positions, counter tweens) live alongside.

pub mod bots;
pub mod format;
pub mod leaderboard;
pub mod navigation;
pub mod sort;
pub mod tween;

pub use bots::{BotsView, Counter, Dashboard};
pub use leaderboard::{HeaderCell, LeaderboardRow, LeaderboardView};
pub use sort::{SortColumn, SortOrder, SortState};

/// Writes the `search` value back to the navigation layer. `None` clears it.
pub type SearchSync = Box<dyn Fn(Option<&str>) + Send + Sync>;

/// Host callback asked to switch tabs, given the target route.
pub type TabChange = Box<dyn Fn(&str) + Send + Sync>;
