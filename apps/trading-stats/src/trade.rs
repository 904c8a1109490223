//! Closed-trade records consumed by the statistics engine.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque trade identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    /// Create a trade identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TradeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TradeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A trade as supplied by the trade source.
///
/// Only closed trades contribute to statistics. The engine never mutates a
/// trade; callers hand it out by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade identifier.
    pub id: TradeId,
    /// Entry timestamp.
    pub entry_timestamp: DateTime<Utc>,
    /// Exit timestamp, absent while the trade is open.
    #[serde(default)]
    pub exit_timestamp: Option<DateTime<Utc>>,
    /// Realized P&L.
    pub pnl: Decimal,
    /// P&L after fees.
    pub net_pnl: Decimal,
    /// Fees paid (non-negative).
    pub fees: Decimal,
    /// Whether the trade has been closed.
    pub closed: bool,
    /// Free-form labels attached by the journal.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Trade {
    /// Create a closed trade with `net_pnl = pnl - fees` and no tags.
    #[must_use]
    pub fn closed(
        id: impl Into<TradeId>,
        entry_timestamp: DateTime<Utc>,
        exit_timestamp: DateTime<Utc>,
        pnl: Decimal,
        fees: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            entry_timestamp,
            exit_timestamp: Some(exit_timestamp),
            pnl,
            net_pnl: pnl - fees,
            fees,
            closed: true,
            tags: BTreeSet::new(),
        }
    }

    /// Attach a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Check whether the trade carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Holding time measured to the exit, or to `now` while still open.
    #[must_use]
    pub fn duration_at(&self, now: DateTime<Utc>) -> TimeDelta {
        self.exit_timestamp.unwrap_or(now) - self.entry_timestamp
    }

    /// Holding time measured to the exit, or to the current time while open.
    /// The clock is only read for open trades.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.exit_timestamp.unwrap_or_else(Utc::now) - self.entry_timestamp
    }

    /// Exit timestamp, falling back to the entry timestamp.
    #[must_use]
    pub fn exit_or_entry(&self) -> DateTime<Utc> {
        self.exit_timestamp.unwrap_or(self.entry_timestamp)
    }
}
