//! Trading Stats Binary
//!
//! Computes performance statistics for a JSON file of trades and writes the
//! snapshot as JSON to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin trading-stats -- trades.json --config trading-stats.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `TRADING_STATS_CONFIG`: config path used when `--config` is absent
//! - `RUST_LOG`: Log level (default: from config, else info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use trading_stats::config::{Config, load_config};
use trading_stats::stats::{
    StatsDriver, format_decimal, format_duration, format_pct, format_ratio,
};
use trading_stats::telemetry::init_telemetry;
use trading_stats::trade::Trade;

/// Compute performance statistics for a JSON array of trades.
#[derive(Debug, Parser)]
#[command(name = "trading-stats", version, about)]
struct Args {
    /// JSON file holding the trades, in entry-time order.
    trades_path: PathBuf,

    /// YAML report configuration.
    #[arg(short, long, env = "TRADING_STATS_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    init_telemetry(&config.logging)?;

    let contents = std::fs::read_to_string(&args.trades_path)
        .with_context(|| format!("reading trades from {}", args.trades_path.display()))?;
    let trades: Vec<Trade> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing trades from {}", args.trades_path.display()))?;

    tracing::info!(
        trades = trades.len(),
        partial_stats = config.partial_stats.len(),
        path = %args.trades_path.display(),
        "Computing trading stats"
    );

    let mut driver = StatsDriver::new(config.partial_stats)?;
    driver.record_all(&trades);
    let stats = driver.finish();

    match &stats {
        Some(stats) => tracing::info!(
            count = stats.count,
            pnl = %format_decimal(stats.pnl),
            win_percent = %format_pct(stats.win_percent),
            profit_factor = %format_ratio(stats.profit_factor),
            expectancy = %format_ratio(stats.expectancy),
            duration_average = %format_duration(stats.duration_average),
            drawdowns = stats.drawdowns.len(),
            drawdown_max = %format_ratio(stats.drawdown_max),
            "Summary"
        ),
        None => tracing::warn!("No closed trades found"),
    }

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
