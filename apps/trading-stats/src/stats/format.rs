//! Formatting utilities for statistics display.

use chrono::TimeDelta;
use rust_decimal::Decimal;

/// Format a percentage value (already scaled to 0..=100).
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!("{value:.2}%")
}

/// Format a decimal with 2 decimal places.
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Format an optional ratio, rendering undefined values as `N/A`.
#[must_use]
pub fn format_ratio(value: Option<Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.4}"))
}

/// Format a duration as `[-][Nd ]HH:MM:SS`.
#[must_use]
pub fn format_duration(value: TimeDelta) -> String {
    let sign = if value < TimeDelta::zero() { "-" } else { "" };
    let total = value.num_seconds().unsigned_abs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{sign}{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}
