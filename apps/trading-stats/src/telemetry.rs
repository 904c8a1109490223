//! Tracing Setup
//!
//! Installs a `tracing-subscriber` fmt subscriber for the report binary.
//!
//! # Configuration
//!
//! - `RUST_LOG`: standard filter directives; overrides `logging.level`
//! - `logging.format`: `pretty`, `compact` or `json`
//!
//! # Usage
//!
//! ```rust,ignore
//! use trading_stats::config::LoggingConfig;
//! use trading_stats::telemetry::init_telemetry;
//!
//! init_telemetry(&LoggingConfig::default())?;
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Error type for telemetry setup.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the event filter: `RUST_LOG` when set, the configured level otherwise.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// reserved for the report.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.include_target)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| TelemetryError::SubscriberError(e.to_string()))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Tracing initialized");
    Ok(())
}
