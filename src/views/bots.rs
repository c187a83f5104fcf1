//! Bot statistics view.
//!
//! Holds the loaded years, the selected year and the `search` value that
//! names the selected entrant. Stats and options are rebuilt whenever the
//! races or the year change; the selection itself is derived from `search`
//! so it follows the entrant across years.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::calculate::{bot_options, bot_stats, race_history, BotOption, RacePoint};
use crate::loader::YearMap;
use crate::models::{BotStat, RaceRecord, Tier};

use super::tween::Tween;
use super::SearchSync;

/// One animated counter of the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Counter {
    pub label: &'static str,
    pub tier: Tier,
    pub value: u32,
}

impl Counter {
    /// Transition shown when this counter's value changes.
    pub fn tween(&self) -> Tween {
        Tween::from_zero(self.value as f64)
    }
}

/// Detail panel for the selected entrant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub bot: String,
    pub counters: Vec<Counter>,
}

impl Dashboard {
    pub fn from_stat(stat: &BotStat) -> Self {
        Self {
            bot: stat.bot.clone(),
            counters: Tier::ALL
                .iter()
                .map(|&tier| Counter {
                    label: tier.label(),
                    tier,
                    value: stat.count(tier),
                })
                .collect(),
        }
    }

    /// Text rendering with every counter sampled `elapsed` into its tween.
    pub fn render_text(&self, elapsed: Duration) -> String {
        let mut out = format!("{}\n", self.bot);
        for counter in &self.counters {
            out.push_str(&format!(
                "  {:<8} {:>6}\n",
                counter.label,
                counter.tween().display_at(elapsed)
            ));
        }
        out
    }
}

pub struct BotsView {
    races: YearMap,
    year: String,
    search: Option<String>,
    stats: Vec<BotStat>,
    options: Vec<BotOption>,
    on_search_change: Option<SearchSync>,
}

impl std::fmt::Debug for BotsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotsView")
            .field("year", &self.year)
            .field("search", &self.search)
            .field("stats", &self.stats.len())
            .finish()
    }
}

impl BotsView {
    /// A view on `year` with the `search` value read from navigation.
    pub fn new(year: impl Into<String>, search: Option<String>) -> Self {
        Self {
            races: YearMap::default(),
            year: year.into(),
            search: search.filter(|s| !s.is_empty()),
            stats: Vec::new(),
            options: Vec::new(),
            on_search_change: None,
        }
    }

    /// Callback that writes the `search` value back to navigation.
    pub fn with_search_sync(mut self, on_search_change: SearchSync) -> Self {
        self.on_search_change = Some(on_search_change);
        self
    }

    /// Publish freshly loaded race data.
    pub fn set_races(&mut self, races: YearMap) {
        self.races = races;
        self.recompute();
    }

    /// Switch the selected year.
    pub fn set_year(&mut self, year: impl Into<String>) {
        self.year = year.into();
        self.recompute();
    }

    /// Navigation changed the `search` value. Does not write it back.
    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search.filter(|s| !s.is_empty());
    }

    /// User picked an entrant (or cleared the pick).
    ///
    /// Re-picking the current selection does nothing. Otherwise `search` is
    /// updated and written back to navigation, empty when cleared.
    pub fn select(&mut self, bot: Option<&str>) {
        if let (Some(current), Some(new)) = (self.selected(), bot) {
            if current.bot == new {
                return;
            }
        }

        self.search = bot.filter(|b| !b.is_empty()).map(str::to_string);
        debug!("Selected bot: {:?}", self.search);

        if let Some(on_search_change) = &self.on_search_change {
            on_search_change(self.search.as_deref());
        }
    }

    fn recompute(&mut self) {
        let records = self.races.get(&self.year);
        self.stats = bot_stats(records);
        self.options = bot_options(&self.stats);
        debug!(
            "Year {}: {} races, {} bots",
            self.year,
            records.len(),
            self.stats.len()
        );
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Years with data, ascending, without `"all"`.
    pub fn available_years(&self) -> Vec<&str> {
        self.races.years()
    }

    /// Records of the selected year.
    pub fn records(&self) -> &[RaceRecord] {
        self.races.get(&self.year)
    }

    /// Stats of the selected year, in order of first appearance.
    pub fn stats(&self) -> &[BotStat] {
        &self.stats
    }

    /// Selectable entrants, sorted by identifier.
    pub fn options(&self) -> &[BotOption] {
        &self.options
    }

    /// Stat of the entrant named by `search`, if it raced in the selected year.
    pub fn selected(&self) -> Option<&BotStat> {
        let search = self.search.as_deref()?;
        self.stats.iter().find(|s| s.bot == search)
    }

    pub fn dashboard(&self) -> Option<Dashboard> {
        self.selected().map(Dashboard::from_stat)
    }

    /// Graph input for the selected entrant; empty without a selection.
    pub fn history(&self) -> Vec<RacePoint> {
        match self.selected() {
            Some(stat) => race_history(&stat.bot, self.records()),
            None => Vec::new(),
        }
    }
}
