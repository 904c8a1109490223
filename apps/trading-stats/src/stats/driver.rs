//! Single-pass fan-out over the top-level and partial accumulators.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::accumulator::StatsAccumulator;
use super::error::StatsError;
use super::keys::PartialStatsKey;
use super::types::TradingStats;
use crate::trade::Trade;

/// Drives one top-level accumulator and one accumulator per partial key.
///
/// Trades must arrive in ascending entry-time order; the driver does not
/// sort. Out-of-order entries are logged but processed as given.
#[derive(Debug)]
pub struct StatsDriver<K = Box<dyn PartialStatsKey>> {
    top_level: StatsAccumulator,
    partials: Vec<(K, StatsAccumulator)>,
    last_entry: Option<DateTime<Utc>>,
    skipped_open: u64,
}

impl<K: PartialStatsKey> StatsDriver<K> {
    /// Create a driver for the given partial-statistics keys.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if a label is empty or used twice.
    pub fn new(keys: impl IntoIterator<Item = K>) -> Result<Self, StatsError> {
        let mut seen = HashSet::new();
        let mut partials = Vec::new();

        for key in keys {
            let label = key.label();
            if label.is_empty() {
                return Err(StatsError::EmptyPartialKeyLabel);
            }
            if !seen.insert(label.to_string()) {
                return Err(StatsError::DuplicatePartialKey {
                    label: label.to_string(),
                });
            }
            partials.push((key, StatsAccumulator::new()));
        }

        Ok(Self {
            top_level: StatsAccumulator::new(),
            partials,
            last_entry: None,
            skipped_open: 0,
        })
    }

    /// Feed one trade to the top level and to every partial that accepts it.
    pub fn record(&mut self, trade: &Trade) {
        if !trade.closed {
            warn!(trade_id = %trade.id, "Skipping open trade");
            self.skipped_open += 1;
            return;
        }

        if let Some(last_entry) = self
            .last_entry
            .filter(|last_entry| trade.entry_timestamp < *last_entry)
        {
            warn!(
                trade_id = %trade.id,
                entry = %trade.entry_timestamp,
                previous_entry = %last_entry,
                "Trade out of entry-time order; drawdowns may be misattributed"
            );
        }
        self.last_entry = Some(trade.entry_timestamp);

        self.top_level.record(trade);
        for (key, accumulator) in &mut self.partials {
            if key.should_include_trade(trade) {
                accumulator.record(trade);
            }
        }
    }

    /// Feed every trade of `trades`, in iteration order.
    pub fn record_all<'a>(&mut self, trades: impl IntoIterator<Item = &'a Trade>) {
        for trade in trades {
            self.record(trade);
        }
    }

    /// Build the top-level snapshot with its partial snapshots attached.
    ///
    /// Returns `None` when no closed trade was recorded.
    #[must_use]
    pub fn finish(self) -> Option<TradingStats> {
        let partial_stats: BTreeMap<String, Option<TradingStats>> = self
            .partials
            .into_iter()
            .map(|(key, accumulator)| (key.label().to_string(), accumulator.build()))
            .collect();

        info!(
            trades = self.top_level.count(),
            skipped_open = self.skipped_open,
            partials = partial_stats.len(),
            "Trading stats computed"
        );

        self.top_level.build_with_partials(partial_stats)
    }
}

/// Compute statistics for `trades` in one pass.
///
/// # Errors
///
/// Returns [`StatsError`] if the partial keys are invalid.
pub fn compute_stats<'a, K: PartialStatsKey>(
    trades: impl IntoIterator<Item = &'a Trade>,
    keys: impl IntoIterator<Item = K>,
) -> Result<Option<TradingStats>, StatsError> {
    let mut driver = StatsDriver::new(keys)?;
    driver.record_all(trades);
    Ok(driver.finish())
}
