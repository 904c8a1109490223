//! Immutable statistics snapshot.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::drawdown::Drawdown;

/// Statistics over one set of closed trades.
///
/// Ratios are rounded to four fractional digits (half-to-even) with trailing
/// zeros stripped. Optional fields are `None` when the ratio is undefined for
/// the subset, e.g. `win_average` when there are no winners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingStats {
    // Totals
    /// Number of closed trades.
    pub count: u64,
    /// Cumulative P&L.
    pub pnl: Decimal,
    /// Cumulative P&L after fees.
    pub pnl_net: Decimal,
    /// High-water mark of cumulative P&L (never below zero).
    pub pnl_peak: Decimal,
    /// High-water mark of cumulative net P&L (never below zero).
    pub pnl_net_peak: Decimal,
    /// Total fees.
    pub fees: Decimal,
    /// Fees per trade.
    pub fees_average: Decimal,
    /// Winning P&L divided by losing P&L. Negative, since losses are summed as
    /// negative values.
    pub profit_factor: Option<Decimal>,
    /// Mean holding time.
    #[serde(with = "super::duration_serde")]
    pub duration_average: TimeDelta,
    /// Probability-weighted average outcome per trade.
    pub expectancy: Option<Decimal>,

    // Winners
    /// Number of trades with positive P&L.
    pub win_count: u64,
    /// Sum of winning P&L.
    pub win_pnl: Decimal,
    /// Sum of winning net P&L.
    pub win_pnl_net: Decimal,
    /// Fees paid on winners.
    pub win_fees: Decimal,
    /// Share of winners, in percent.
    pub win_percent: Decimal,
    /// Largest winning P&L.
    pub win_largest: Option<Decimal>,
    /// Mean winning P&L.
    pub win_average: Option<Decimal>,
    /// Longest run of consecutive winners.
    pub win_streak_longest: u64,
    /// Mean holding time of winners.
    #[serde(with = "super::duration_serde::option")]
    pub win_duration_average: Option<TimeDelta>,

    // Losers
    /// Number of trades with negative P&L.
    pub loss_count: u64,
    /// Sum of losing P&L (negative).
    pub loss_pnl: Decimal,
    /// Sum of losing net P&L.
    pub loss_pnl_net: Decimal,
    /// Fees paid on losers.
    pub loss_fees: Decimal,
    /// Share of losers, in percent.
    pub loss_percent: Decimal,
    /// Most negative losing P&L.
    pub loss_largest: Option<Decimal>,
    /// Mean losing P&L (negative).
    pub loss_average: Option<Decimal>,
    /// Longest run of consecutive losers.
    pub loss_streak_longest: u64,
    /// Mean holding time of losers.
    #[serde(with = "super::duration_serde::option")]
    pub loss_duration_average: Option<TimeDelta>,

    // Drawdowns
    /// Drawdown episodes in chronological order.
    pub drawdowns: Vec<Drawdown>,
    /// Most negative episode depth.
    pub drawdown_max: Option<Decimal>,
    /// Mean episode depth.
    pub drawdown_average: Option<Decimal>,
    /// Longest episode.
    #[serde(with = "super::duration_serde::option")]
    pub drawdown_duration_max: Option<TimeDelta>,
    /// Mean episode length.
    #[serde(with = "super::duration_serde::option")]
    pub drawdown_duration_average: Option<TimeDelta>,

    /// Statistics over caller-defined subsets, keyed by partial-stats label.
    /// `None` when a subset matched no closed trade. Nested snapshots never
    /// carry partial statistics of their own.
    #[serde(default)]
    pub partial_stats: BTreeMap<String, Option<TradingStats>>,
}

impl TradingStats {
    /// Trades with zero P&L, counted as neither winners nor losers.
    #[must_use]
    pub const fn breakeven_count(&self) -> u64 {
        self.count
            .saturating_sub(self.win_count)
            .saturating_sub(self.loss_count)
    }

    /// Partial statistics for `label`.
    ///
    /// Returns `None` both for unknown labels and for subsets without trades.
    #[must_use]
    pub fn partial(&self, label: &str) -> Option<&Self> {
        self.partial_stats.get(label).and_then(Option::as_ref)
    }
}
