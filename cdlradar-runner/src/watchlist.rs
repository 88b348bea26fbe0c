//! Watchlist view: filter and sort instruments with their latest analyses.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use cdlradar_core::domain::{ActionType, AssetClass, Instrument, MultiTimeframeAnalysis, SignalType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Symbol,
    Action,
    Signal,
    Price,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One visible row.
#[derive(Debug, Clone, Copy)]
pub struct WatchRow<'a> {
    pub instrument: &'a Instrument,
    pub analysis: Option<&'a MultiTimeframeAnalysis>,
}

/// Filter/search/sort settings. The default shows everything in
/// configuration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchlistView {
    pub asset_class: Option<AssetClass>,
    /// Case-insensitive substring of the symbol.
    pub search: String,
    pub sort: Option<(SortKey, SortDirection)>,
}

impl WatchlistView {
    /// Toggle sorting on `key`: ascending first, descending when the same
    /// key is requested again.
    pub fn request_sort(&mut self, key: SortKey) {
        let direction = match self.sort {
            Some((current, SortDirection::Asc)) if current == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.sort = Some((key, direction));
    }

    /// Visible rows, each paired with `lookup(symbol)`. Sorting uses the same
    /// analyses the rows carry. Ties keep configuration order.
    pub fn rows<'a, F>(&self, instruments: &'a [Instrument], lookup: F) -> Vec<WatchRow<'a>>
    where
        F: Fn(&str) -> Option<&'a MultiTimeframeAnalysis>,
    {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<WatchRow<'a>> = instruments
            .iter()
            .filter(|i| self.asset_class.map_or(true, |c| i.asset_class == c))
            .filter(|i| needle.is_empty() || i.symbol.to_lowercase().contains(&needle))
            .map(|instrument| WatchRow {
                instrument,
                analysis: lookup(&instrument.symbol),
            })
            .collect();

        if let Some((key, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ord = compare(key, a, b);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        rows
    }
}

fn compare(key: SortKey, a: &WatchRow<'_>, b: &WatchRow<'_>) -> Ordering {
    match key {
        SortKey::Symbol => a.instrument.symbol.cmp(&b.instrument.symbol),
        SortKey::Price => price(a).total_cmp(&price(b)),
        SortKey::Action => action_rank(a).cmp(&action_rank(b)),
        SortKey::Signal => signal_rank(a).cmp(&signal_rank(b)),
    }
}

/// Rows without an analysis sort as price 0.
fn price(row: &WatchRow<'_>) -> f64 {
    row.analysis.map_or(0.0, |a| a.price)
}

/// Rows without an analysis sort first.
fn action_rank(row: &WatchRow<'_>) -> u8 {
    match row.analysis.map(|a| a.action) {
        None => 0,
        Some(ActionType::EnterNow) => 1,
        Some(ActionType::Exit) => 2,
        Some(ActionType::Wait) => 3,
        Some(ActionType::NewsPending) => 4,
        Some(ActionType::MarketClosed) => 5,
        Some(ActionType::NoAction) => 6,
    }
}

fn signal_rank(row: &WatchRow<'_>) -> u8 {
    match row.analysis.map(|a| a.main_signal) {
        None => 0,
        Some(SignalType::Buy) => 1,
        Some(SignalType::Sale) => 2,
        Some(SignalType::Neutral) => 3,
    }
}
