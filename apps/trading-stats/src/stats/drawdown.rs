//! Drawdown episode detection along the cumulative P&L curve.
//!
//! An episode opens on the first trade that leaves cumulative P&L strictly
//! below its high-water mark and closes on the trade that sets a new high.
//! Each update runs two independent checks, in order:
//!
//! 1. **Finalize**: the active episode was measured against a peak that is no
//!    longer current, so it ends at the entry of the trade being recorded.
//! 2. **Extend or open**: cumulative P&L is below the peak, so the active
//!    episode absorbs the trade, or a new one starts with it.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::trade::{Trade, TradeId};

/// A finalized drawdown episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawdown {
    /// Number of trades spanned by the episode.
    pub trade_count: u64,
    /// Entry timestamp of the first trade in the episode.
    pub from: DateTime<Utc>,
    /// End of the episode.
    pub to: DateTime<Utc>,
    /// `to - from`.
    #[serde(with = "super::duration_serde")]
    pub duration: TimeDelta,
    /// First trade of the episode.
    pub trade_id_from: TradeId,
    /// Last trade of the episode.
    pub trade_id_to: TradeId,
    /// Equity peak the episode fell from.
    pub pnl_peak: Decimal,
    /// Deepest point below the peak, as a non-positive amount.
    pub drawdown: Decimal,
}

/// The episode currently being extended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DrawdownInProgress {
    trade_count: u64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    trade_id_from: TradeId,
    trade_id_to: TradeId,
    pnl_peak: Decimal,
    drawdown: Decimal,
}

impl DrawdownInProgress {
    fn open(trade: &Trade, pnl: Decimal, pnl_peak: Decimal) -> Self {
        Self {
            trade_count: 1,
            from: trade.entry_timestamp,
            to: trade.exit_or_entry(),
            trade_id_from: trade.id.clone(),
            trade_id_to: trade.id.clone(),
            pnl_peak,
            drawdown: -(pnl_peak - pnl),
        }
    }

    fn extend(&mut self, trade: &Trade, pnl: Decimal, pnl_peak: Decimal) {
        self.trade_count += 1;
        self.to = trade.exit_or_entry();
        self.trade_id_to = trade.id.clone();
        self.drawdown = self.drawdown.min(-(pnl_peak - pnl));
    }

    fn finalize(self, to: DateTime<Utc>) -> Drawdown {
        Drawdown {
            trade_count: self.trade_count,
            from: self.from,
            to,
            duration: to - self.from,
            trade_id_from: self.trade_id_from,
            trade_id_to: self.trade_id_to,
            pnl_peak: self.pnl_peak,
            drawdown: self.drawdown,
        }
    }
}

/// Running drawdown state: finalized episodes plus the active one, if any.
#[derive(Debug, Clone, Default)]
pub struct DrawdownTracker {
    current: Option<DrawdownInProgress>,
    drawdowns: Vec<Drawdown>,
}

impl DrawdownTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one trade in. `pnl` and `pnl_peak` must already include it.
    pub fn update(&mut self, trade: &Trade, pnl: Decimal, pnl_peak: Decimal) {
        if let Some(current) = self
            .current
            .take_if(|current| current.pnl_peak != pnl_peak)
        {
            let drawdown = current.finalize(trade.entry_timestamp);
            debug!(
                trade_id_from = %drawdown.trade_id_from,
                trade_id_to = %drawdown.trade_id_to,
                drawdown = %drawdown.drawdown,
                trade_count = drawdown.trade_count,
                "Drawdown recovered"
            );
            self.drawdowns.push(drawdown);
        }

        if pnl < pnl_peak {
            match self.current.as_mut() {
                Some(current) => current.extend(trade, pnl, pnl_peak),
                None => {
                    debug!(trade_id = %trade.id, peak = %pnl_peak, pnl = %pnl, "Drawdown opened");
                    self.current = Some(DrawdownInProgress::open(trade, pnl, pnl_peak));
                }
            }
        }
    }

    /// Whether an episode is currently open.
    #[must_use]
    pub const fn in_drawdown(&self) -> bool {
        self.current.is_some()
    }

    /// All episodes, including one still open at the end of the sequence.
    #[must_use]
    pub fn finish(mut self) -> Vec<Drawdown> {
        if let Some(current) = self.current.take() {
            let to = current.to;
            self.drawdowns.push(current.finalize(to));
        }
        self.drawdowns
    }
}
