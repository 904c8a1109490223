// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::cast_possible_truncation
    )
)]

//! Trading Stats - Rust Core Library
//!
//! Single-pass performance analytics over a sequence of closed trades.
//!
//! # Architecture
//!
//! - **trade**: the input record (`Trade`, `TradeId`)
//! - **stats**: the engine
//!   - `StatsAccumulator`: running sums, streaks and the drawdown state machine
//!   - `TradingStats`: immutable snapshot produced by `StatsAccumulator::build`
//!   - `StatsDriver`: feeds one top-level and N partial accumulators in one pass
//! - **config**: YAML configuration for the report binary
//! - **telemetry**: tracing subscriber setup
//!
//! The engine performs no I/O and holds no shared state; each accumulator
//! is owned by one caller for its whole create → record → build lifetime.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loading and validation.
pub mod config;

/// Statistics engine.
pub mod stats;

/// Tracing subscriber setup.
pub mod telemetry;

/// Trade records.
pub mod trade;

pub use stats::{
    Drawdown, PartialStatsFilter, PartialStatsKey, StatsAccumulator, StatsDriver, StatsError,
    TradeFilter, TradingStats, compute_stats,
};
pub use trade::{Trade, TradeId};
