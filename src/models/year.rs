//! Year labels used to key the per-year race files.

use chrono::{Datelike, Utc};

/// Pseudo-year holding the records of every fetched year.
pub const ALL_YEARS: &str = "all";

/// Current calendar year (UTC).
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Year labels from `first` through `last` inclusive. Empty if `first > last`.
pub fn years_between(first: i32, last: i32) -> Vec<String> {
    (first..=last).map(|y| y.to_string()).collect()
}

/// Year labels from `first` through the current year.
pub fn years_until_now(first: i32) -> Vec<String> {
    years_between(first, current_year())
}
