//! Yearly race data loading.
//!
//! Requests every year's race file concurrently and folds the settled
//! results into a [`YearMap`]. A year that fails to load is logged and left
//! out; it never aborts its siblings.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::fetch::{FetchError, RaceSource};
use crate::models::{RaceRecord, ALL_YEARS};

/// Race records keyed by year label, plus the `"all"` pseudo-year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearMap {
    years: BTreeMap<String, Vec<RaceRecord>>,
}

impl YearMap {
    /// Build the map from settled per-year results.
    ///
    /// Failed years are omitted. `"all"` holds the concatenation of every
    /// successful year and is present only if at least one year loaded.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, Result<Vec<RaceRecord>, FetchError>)>,
    {
        let mut years: BTreeMap<String, Vec<RaceRecord>> = BTreeMap::new();

        for (year, result) in results {
            match result {
                Ok(records) => {
                    years.insert(year, records);
                }
                Err(e) => warn!("Error fetching race data for year {}: {}", year, e),
            }
        }

        if !years.is_empty() {
            let all: Vec<RaceRecord> = years.values().flatten().cloned().collect();
            years.insert(ALL_YEARS.to_string(), all);
        }

        Self { years }
    }

    /// Records for `year`, empty when the year is unknown or failed to load.
    pub fn get(&self, year: &str) -> &[RaceRecord] {
        self.years.get(year).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, year: &str) -> bool {
        self.years.contains_key(year)
    }

    /// Loaded year labels in ascending order, without `"all"`.
    pub fn years(&self) -> Vec<&str> {
        self.years
            .keys()
            .map(String::as_str)
            .filter(|y| *y != ALL_YEARS)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Fetch every year concurrently and wait for all of them to settle.
///
/// Dropping the returned future aborts any request still in flight.
pub async fn load_years(source: Arc<dyn RaceSource>, years: &[String]) -> YearMap {
    info!(
        "Loading {} years of race data from {}",
        years.len(),
        source.describe()
    );

    let mut tasks = JoinSet::new();
    for year in years {
        let source = Arc::clone(&source);
        let year = year.clone();
        tasks.spawn(async move {
            let result = source.year_records(&year).await;
            (year, result)
        });
    }

    let mut settled = Vec::with_capacity(years.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => settled.push(outcome),
            Err(e) => warn!("Race data task failed: {}", e),
        }
    }

    let map = YearMap::from_results(settled);
    info!("Loaded race data for years: {:?}", map.years());
    map
}
