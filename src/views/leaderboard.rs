//! All-time leaderboard view.

use serde::Serialize;
use tracing::{error, info};

use crate::calculate::contestants;
use crate::fetch::{FetchError, RaceSource};
use crate::models::{Contestant, RaceRecord};

use super::format::{format_position, format_usd};
use super::navigation::{bot_link, BOTS_ROUTE};
use super::sort::{SortColumn, SortState};
use super::TabChange;

/// One header cell of the leaderboard table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub label: &'static str,

    /// Column this header sorts by; `None` for the rank column
    pub column: Option<SortColumn>,

    /// Direction arrow when this is the active sort column
    pub arrow: Option<&'static str>,
}

/// One rendered leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    /// 1-based rank in the current sort order
    pub rank: usize,
    pub name: String,

    /// Link to the bot statistics view for this entrant
    pub link: String,
    pub earnings: f64,
    pub earnings_display: String,
    pub races: u32,
    pub avg_position: f64,
    pub avg_position_display: String,
}

/// Contestants in display order plus the sort controller.
pub struct LeaderboardView {
    contestants: Vec<Contestant>,
    sort: SortState,
    on_tab_change: Option<TabChange>,
}

impl Default for LeaderboardView {
    fn default() -> Self {
        Self::new(SortState::default())
    }
}

impl std::fmt::Debug for LeaderboardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardView")
            .field("contestants", &self.contestants.len())
            .field("sort", &self.sort)
            .finish()
    }
}

impl LeaderboardView {
    /// An empty leaderboard with the given sort.
    pub fn new(sort: SortState) -> Self {
        Self {
            contestants: Vec::new(),
            sort,
            on_tab_change: None,
        }
    }

    /// Host callback invoked when a row link is followed.
    pub fn with_tab_change(mut self, on_tab_change: TabChange) -> Self {
        self.on_tab_change = Some(on_tab_change);
        self
    }

    /// Replace the contestants with a fresh aggregation of `records`,
    /// ordered by the current sort.
    pub fn load(&mut self, records: &[RaceRecord]) {
        self.contestants = contestants(records);
        self.sort.apply(&mut self.contestants);
        info!(
            "Leaderboard built from {} races: {} contestants",
            records.len(),
            self.contestants.len()
        );
    }

    /// Like [`load`](Self::load), but a failed fetch logs and leaves the
    /// leaderboard empty.
    pub fn load_result(&mut self, result: Result<Vec<RaceRecord>, FetchError>) {
        match result {
            Ok(records) => self.load(&records),
            Err(e) => {
                error!("Error fetching race data: {}", e);
                self.contestants.clear();
            }
        }
    }

    /// Fetch the all-time race file from `source` and load it.
    pub async fn fetch(&mut self, source: &dyn RaceSource) {
        let result = source.all_time_records().await;
        self.load_result(result);
    }

    /// Header click. Re-sorts the current list without re-aggregating.
    pub fn click_header(&mut self, column: SortColumn) {
        self.sort.click(column);
        self.sort.apply(&mut self.contestants);
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Contestants in display order.
    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    pub fn is_empty(&self) -> bool {
        self.contestants.is_empty()
    }

    pub fn headers(&self) -> Vec<HeaderCell> {
        let mut headers = vec![HeaderCell {
            label: "Rank",
            column: None,
            arrow: None,
        }];
        headers.extend(SortColumn::ALL.iter().map(|&column| HeaderCell {
            label: column.label(),
            column: Some(column),
            arrow: (column == self.sort.column).then(|| self.sort.order.arrow()),
        }));
        headers
    }

    pub fn rows(&self) -> Vec<LeaderboardRow> {
        self.contestants
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let avg_position = c.average_position();
                LeaderboardRow {
                    rank: index + 1,
                    name: c.name.clone(),
                    link: bot_link(&c.name),
                    earnings: c.earnings,
                    earnings_display: format_usd(c.earnings),
                    races: c.races,
                    avg_position,
                    avg_position_display: format_position(avg_position),
                }
            })
            .collect()
    }

    /// Follow a row link: notify the host of the tab change and return the
    /// target link. `None` if `name` is not on the leaderboard.
    pub fn open_bot(&self, name: &str) -> Option<String> {
        let contestant = self.contestants.iter().find(|c| c.name == name)?;
        if let Some(on_tab_change) = &self.on_tab_change {
            on_tab_change(BOTS_ROUTE);
        }
        Some(bot_link(&contestant.name))
    }

    /// Plain-text table for the terminal.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let headers: Vec<String> = self
            .headers()
            .iter()
            .map(|h| match h.arrow {
                Some(arrow) => format!("{} {}", h.label, arrow),
                None => h.label.to_string(),
            })
            .collect();

        out.push_str(&format!(
            "{:>5}  {:<24} {:>16} {:>8} {:>14}\n",
            headers[0], headers[1], headers[2], headers[3], headers[4]
        ));
        for row in self.rows() {
            out.push_str(&format!(
                "{:>5}  {:<24} {:>16} {:>8} {:>14}\n",
                row.rank, row.name, row.earnings_display, row.races, row.avg_position_display
            ));
        }
        out
    }
}
