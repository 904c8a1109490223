//! Partial-statistics keys: named predicates selecting a subset of trades.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trade::Trade;

/// Selects the trades that feed one partial-statistics snapshot.
///
/// The label is the caller's handle for the subset: it keys the snapshot in
/// [`TradingStats::partial_stats`](super::TradingStats::partial_stats) and
/// must be unique among the keys handed to one driver.
pub trait PartialStatsKey {
    /// Stable, caller-unique handle for this subset.
    fn label(&self) -> &str;

    /// Whether `trade` belongs to the subset.
    fn should_include_trade(&self, trade: &Trade) -> bool;
}

impl<K: PartialStatsKey + ?Sized> PartialStatsKey for Box<K> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn should_include_trade(&self, trade: &Trade) -> bool {
        (**self).should_include_trade(trade)
    }
}

/// Built-in trade predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeFilter {
    /// Trades with positive P&L.
    Winners,
    /// Trades with negative P&L.
    Losers,
    /// Trades with zero P&L.
    Breakeven,
    /// Trades carrying a tag.
    Tag {
        /// Required tag.
        tag: String,
    },
    /// Trades entered in `[from, to)`.
    EnteredBetween {
        /// Inclusive lower bound.
        from: DateTime<Utc>,
        /// Exclusive upper bound.
        to: DateTime<Utc>,
    },
}

impl TradeFilter {
    /// Evaluate the filter against a trade.
    #[must_use]
    pub fn matches(&self, trade: &Trade) -> bool {
        match self {
            Self::Winners => trade.pnl > Decimal::ZERO,
            Self::Losers => trade.pnl < Decimal::ZERO,
            Self::Breakeven => trade.pnl.is_zero(),
            Self::Tag { tag } => trade.has_tag(tag),
            Self::EnteredBetween { from, to } => {
                trade.entry_timestamp >= *from && trade.entry_timestamp < *to
            }
        }
    }
}

/// A labelled [`TradeFilter`], as declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialStatsFilter {
    /// Subset label.
    pub label: String,
    /// Predicate.
    pub filter: TradeFilter,
}

impl PartialStatsFilter {
    /// Create a labelled filter.
    #[must_use]
    pub fn new(label: impl Into<String>, filter: TradeFilter) -> Self {
        Self {
            label: label.into(),
            filter,
        }
    }
}

impl PartialStatsKey for PartialStatsFilter {
    fn label(&self) -> &str {
        &self.label
    }

    fn should_include_trade(&self, trade: &Trade) -> bool {
        self.filter.matches(trade)
    }
}

/// Closure-backed key for ad-hoc subsets.
pub struct PredicateKey<F> {
    label: String,
    predicate: F,
}

impl<F> PredicateKey<F>
where
    F: Fn(&Trade) -> bool,
{
    /// Create a key from a label and a predicate.
    pub fn new(label: impl Into<String>, predicate: F) -> Self {
        Self {
            label: label.into(),
            predicate,
        }
    }
}

impl<F> fmt::Debug for PredicateKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateKey")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<F> PartialStatsKey for PredicateKey<F>
where
    F: Fn(&Trade) -> bool,
{
    fn label(&self) -> &str {
        &self.label
    }

    fn should_include_trade(&self, trade: &Trade) -> bool {
        (self.predicate)(trade)
    }
}
