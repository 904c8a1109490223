//! Single-pass trading performance statistics.
//!
//! Folds closed trades, in entry-time order, into:
//! - P&L totals and equity high-water marks
//! - Winner/loser breakdown with streaks and averages
//! - Profit factor and expectancy
//! - Drawdown episodes (peak-to-trough dips of cumulative P&L)
//! - Partial statistics over caller-defined subsets, computed in the same pass
//!
//! # Example
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use rust_decimal_macros::dec;
//! use trading_stats::stats::{PartialStatsFilter, TradeFilter, compute_stats};
//! use trading_stats::Trade;
//!
//! let entry = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
//! let exit = entry + TimeDelta::hours(1);
//! let trades = vec![
//!     Trade::closed("a", entry, exit, dec!(120), dec!(1)),
//!     Trade::closed("b", exit, exit + TimeDelta::hours(1), dec!(-80), dec!(1)),
//! ];
//! let keys = vec![PartialStatsFilter::new("winners", TradeFilter::Winners)];
//!
//! let stats = compute_stats(&trades, keys).unwrap().unwrap();
//! assert_eq!(stats.pnl, dec!(40));
//! assert_eq!(stats.profit_factor, Some(dec!(-1.5)));
//! assert_eq!(stats.partial("winners").unwrap().count, 1);
//! ```

mod accumulator;
mod constants;
mod drawdown;
mod driver;
mod duration_serde;
mod error;
mod format;
mod keys;
mod math;
mod types;

pub use accumulator::StatsAccumulator;
pub use drawdown::{Drawdown, DrawdownTracker};
pub use driver::{StatsDriver, compute_stats};
pub use error::StatsError;
pub use format::{format_decimal, format_duration, format_pct, format_ratio};
pub use keys::{PartialStatsFilter, PartialStatsKey, PredicateKey, TradeFilter};
pub use math::divide;
pub use types::TradingStats;
