//! Configuration for the statistics report.
//!
//! Loads YAML with `${VAR}` / `${VAR:-default}` environment interpolation,
//! then validates it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trading_stats::config::load_config;
//!
//! let config = load_config("trading-stats.yaml")?;
//! println!("log level: {}", config.logging.level);
//! ```

mod logging;

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::{PartialStatsFilter, TradeFilter};

pub use logging::{LOG_LEVELS, LogFormat, LoggingConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    ReadError {
        /// File that was requested.
        path: String,
        /// IO failure.
        source: std::io::Error,
    },

    /// The document is not valid YAML for [`Config`].
    #[error("invalid report config: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// The document parsed but a value is out of range.
    #[error("report config rejected: {0}")]
    ValidationError(String),
}

/// Report configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Subscriber settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Partial statistics computed alongside the top-level snapshot.
    #[serde(default)]
    pub partial_stats: Vec<PartialStatsFilter>,
}

/// Read, interpolate and validate a YAML config file.
///
/// # Errors
///
/// [`ConfigError::ReadError`] for IO failures, otherwise as
/// [`load_config_from_string`].
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })
        .and_then(|yaml| load_config_from_string(&yaml))
}

/// Parse and validate YAML config text.
///
/// # Errors
///
/// [`ConfigError::ParseError`] for malformed YAML or unknown filter kinds,
/// [`ConfigError::ValidationError`] for out-of-range values.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml_bw::from_str(&interpolate_env_vars(yaml))?;
    validate_config(&config).map(|()| config)
}

/// Expand `${VAR}` and `${VAR:-default}`. Unset or empty variables take the
/// default, or the empty string when there is none.
#[allow(clippy::expect_used)] // constant pattern
fn interpolate_env_vars(input: &str) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

    let placeholder = PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("placeholder pattern")
    });

    placeholder
        .replace_all(input, |caps: &Captures<'_>| {
            std::env::var(&caps[1])
                .ok()
                .filter(|value| !value.is_empty())
                .or_else(|| caps.get(2).map(|fallback| fallback.as_str().to_string()))
                .unwrap_or_default()
        })
        .into_owned()
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(invalid(format!(
            "logging.level '{}' is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    let mut labels = HashSet::new();
    for PartialStatsFilter { label, filter } in &config.partial_stats {
        if label.trim().is_empty() {
            return Err(invalid("partial_stats entry has an empty label"));
        }
        if !labels.insert(label.as_str()) {
            return Err(invalid(format!("partial_stats label '{label}' is duplicated")));
        }

        match filter {
            TradeFilter::Tag { tag } if tag.trim().is_empty() => {
                return Err(invalid(format!("partial_stats '{label}' has an empty tag")));
            }
            TradeFilter::EnteredBetween { from, to } if from >= to => {
                return Err(invalid(format!(
                    "partial_stats '{label}' window is empty: {from} >= {to}"
                )));
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.logging.include_target);
        assert!(config.partial_stats.is_empty());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_full_config() {
        let yaml = r"
logging:
  level: debug
  format: json
  include_target: false
partial_stats:
  - label: winners
    filter:
      kind: winners
  - label: breakout
    filter:
      kind: tag
      tag: breakout
  - label: q1
    filter:
      kind: entered_between
      from: 2024-01-01T00:00:00Z
      to: 2024-04-01T00:00:00Z
";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load config: {e}"),
        };
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.logging.include_target);
        assert_eq!(config.partial_stats.len(), 3);
        assert_eq!(config.partial_stats[0].filter, TradeFilter::Winners);
        assert!(matches!(
            config.partial_stats[2].filter,
            TradeFilter::EnteredBetween { .. }
        ));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = load_config_from_string("logging:\n  level: loud\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let yaml = r"
partial_stats:
  - label: a
    filter: { kind: winners }
  - label: a
    filter: { kind: losers }
";
        let result = load_config_from_string(yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_empty_tag_rejected() {
        let yaml = r#"
partial_stats:
  - label: a
    filter: { kind: tag, tag: "" }
"#;
        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let yaml = r"
partial_stats:
  - label: a
    filter: { kind: entered_between, from: 2024-04-01T00:00:00Z, to: 2024-01-01T00:00:00Z }
";
        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_filter_kind_is_parse_error() {
        let yaml = r"
partial_stats:
  - label: a
    filter: { kind: sideways }
";
        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "level: ${TRADING_STATS_CONFIG_TEST_NONEXISTENT_VAR:-warn}";
        assert_eq!(interpolate_env_vars(input), "level: warn");
    }

    #[test]
    fn test_env_var_without_default_when_missing() {
        let input = "tag: '${TRADING_STATS_CONFIG_TEST_NONEXISTENT_VAR}'";
        assert_eq!(interpolate_env_vars(input), "tag: ''");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // placeholder syntax, not format args
    fn test_set_env_var_wins_over_default() {
        let Ok(path) = std::env::var("PATH") else {
            return;
        };
        let expanded = interpolate_env_vars("dir: ${PATH:-/nowhere}");
        assert_eq!(expanded, format!("dir: {path}"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = match tempfile::NamedTempFile::new() {
            Ok(f) => f,
            Err(e) => panic!("should create temp file: {e}"),
        };
        if let Err(e) = writeln!(file, "logging:\n  level: warn\n  format: compact") {
            panic!("should write temp file: {e}");
        }

        let config = match load_config(file.path()) {
            Ok(c) => c,
            Err(e) => panic!("should load config file: {e}"),
        };
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = load_config("/definitely/not/here/trading-stats.yaml");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let config = match load_config_from_string(include_str!("../../trading-stats.yaml")) {
            Ok(c) => c,
            Err(e) => panic!("bundled config should load: {e}"),
        };
        let labels: Vec<&str> = config.partial_stats.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["winners", "losers", "breakeven", "breakout", "2024-h1"]);
    }
}
