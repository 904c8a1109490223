//! Running-state accumulator folding closed trades into [`TradingStats`].

use std::collections::BTreeMap;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use tracing::warn;

use super::drawdown::DrawdownTracker;
use super::math::{divide, mean, mean_duration, percent};
use super::types::TradingStats;
use crate::trade::Trade;

/// Per-side (winners or losers) running sums.
#[derive(Debug, Clone)]
struct SideTotals {
    count: u64,
    pnl: Decimal,
    pnl_net: Decimal,
    fees: Decimal,
    duration: TimeDelta,
    largest: Option<Decimal>,
    streak_current: u64,
    streak_longest: u64,
}

impl Default for SideTotals {
    fn default() -> Self {
        Self {
            count: 0,
            pnl: Decimal::ZERO,
            pnl_net: Decimal::ZERO,
            fees: Decimal::ZERO,
            duration: TimeDelta::zero(),
            largest: None,
            streak_current: 0,
            streak_longest: 0,
        }
    }
}

impl SideTotals {
    fn add(&mut self, trade: &Trade, duration: TimeDelta) {
        self.count += 1;
        self.pnl += trade.pnl;
        self.pnl_net += trade.net_pnl;
        self.fees += trade.fees;
        self.duration += duration;
        self.streak_current += 1;
        self.streak_longest = self.streak_longest.max(self.streak_current);
    }
}

/// Single-pass statistics accumulator.
///
/// Create it empty, [`record`](Self::record) each trade once in ascending
/// entry-time order, then consume it with [`build`](Self::build). Open trades
/// are ignored.
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    count: u64,
    pnl: Decimal,
    pnl_net: Decimal,
    pnl_peak: Decimal,
    pnl_net_peak: Decimal,
    fees: Decimal,
    duration: TimeDelta,
    wins: SideTotals,
    losses: SideTotals,
    drawdowns: DrawdownTracker,
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self {
            count: 0,
            pnl: Decimal::ZERO,
            pnl_net: Decimal::ZERO,
            pnl_peak: Decimal::ZERO,
            pnl_net_peak: Decimal::ZERO,
            fees: Decimal::ZERO,
            duration: TimeDelta::zero(),
            wins: SideTotals::default(),
            losses: SideTotals::default(),
            drawdowns: DrawdownTracker::new(),
        }
    }
}

impl StatsAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one trade into the running state.
    pub fn record(&mut self, trade: &Trade) {
        if !trade.closed {
            warn!(trade_id = %trade.id, "Skipping open trade");
            return;
        }

        let duration = trade.duration();

        self.count += 1;
        self.pnl += trade.pnl;
        self.pnl_net += trade.net_pnl;
        self.fees += trade.fees;
        self.duration += duration;
        self.pnl_peak = self.pnl_peak.max(self.pnl);
        self.pnl_net_peak = self.pnl_net_peak.max(self.pnl_net);

        // Zero P&L touches neither side and leaves both streaks alone.
        if trade.pnl > Decimal::ZERO {
            self.wins.add(trade, duration);
            self.wins.largest = Some(self.wins.largest.map_or(trade.pnl, |v| v.max(trade.pnl)));
            self.losses.streak_current = 0;
        } else if trade.pnl < Decimal::ZERO {
            self.losses.add(trade, duration);
            self.losses.largest = Some(self.losses.largest.map_or(trade.pnl, |v| v.min(trade.pnl)));
            self.wins.streak_current = 0;
        }

        self.drawdowns.update(trade, self.pnl, self.pnl_peak);
    }

    /// Closed trades recorded so far.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Current high-water mark of cumulative P&L.
    #[must_use]
    pub const fn pnl_peak(&self) -> Decimal {
        self.pnl_peak
    }

    /// Current high-water mark of cumulative net P&L.
    #[must_use]
    pub const fn pnl_net_peak(&self) -> Decimal {
        self.pnl_net_peak
    }

    /// Length of the winning run ending at the latest trade.
    #[must_use]
    pub const fn win_streak_current(&self) -> u64 {
        self.wins.streak_current
    }

    /// Length of the losing run ending at the latest trade.
    #[must_use]
    pub const fn loss_streak_current(&self) -> u64 {
        self.losses.streak_current
    }

    /// Produce the snapshot, or `None` when no closed trade was recorded.
    #[must_use]
    pub fn build(self) -> Option<TradingStats> {
        self.build_with_partials(BTreeMap::new())
    }

    pub(crate) fn build_with_partials(
        self,
        partial_stats: BTreeMap<String, Option<TradingStats>>,
    ) -> Option<TradingStats> {
        if self.count == 0 {
            return None;
        }

        let win_average = mean(self.wins.pnl, self.wins.count);
        let loss_average = mean(self.losses.pnl, self.losses.count);

        let profit_factor = if self.wins.count == 0 || self.losses.count == 0 {
            None
        } else {
            divide(self.wins.pnl, self.losses.pnl)
        };

        let expectancy = match (win_average, loss_average) {
            (Some(win_average), Some(loss_average)) => {
                let count = Decimal::from(self.count);
                let win_probability = divide(Decimal::from(self.wins.count), count)?;
                let loss_probability = divide(Decimal::from(self.losses.count), count)?;
                Some((win_probability * win_average + loss_probability * loss_average).normalize())
            }
            _ => None,
        };

        let drawdowns = self.drawdowns.finish();
        let drawdown_count = drawdowns.len() as u64;
        let drawdown_max = drawdowns.iter().map(|d| d.drawdown).min();
        let drawdown_duration_max = drawdowns.iter().map(|d| d.duration).max();
        let drawdown_average = mean(drawdowns.iter().map(|d| d.drawdown).sum(), drawdown_count);
        let drawdown_duration_average = mean_duration(
            drawdowns.iter().fold(TimeDelta::zero(), |total, d| total + d.duration),
            drawdown_count,
        );

        Some(TradingStats {
            count: self.count,
            pnl: self.pnl,
            pnl_net: self.pnl_net,
            pnl_peak: self.pnl_peak,
            pnl_net_peak: self.pnl_net_peak,
            fees: self.fees,
            fees_average: mean(self.fees, self.count)?,
            profit_factor,
            duration_average: mean_duration(self.duration, self.count)?,
            expectancy,

            win_count: self.wins.count,
            win_pnl: self.wins.pnl,
            win_pnl_net: self.wins.pnl_net,
            win_fees: self.wins.fees,
            win_percent: percent(self.wins.count, self.count)?,
            win_largest: self.wins.largest,
            win_average,
            win_streak_longest: self.wins.streak_longest,
            win_duration_average: mean_duration(self.wins.duration, self.wins.count),

            loss_count: self.losses.count,
            loss_pnl: self.losses.pnl,
            loss_pnl_net: self.losses.pnl_net,
            loss_fees: self.losses.fees,
            loss_percent: percent(self.losses.count, self.count)?,
            loss_largest: self.losses.largest,
            loss_average,
            loss_streak_longest: self.losses.streak_longest,
            loss_duration_average: mean_duration(self.losses.duration, self.losses.count),

            drawdowns,
            drawdown_max,
            drawdown_average,
            drawdown_duration_max,
            drawdown_duration_average,

            partial_stats,
        })
    }
}
