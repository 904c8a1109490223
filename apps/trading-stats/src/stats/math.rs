//! Exact-rounding arithmetic shared by the derived statistics.
//!
//! Every derived ratio is a quotient rounded to [`RATIO_SCALE`] fractional
//! digits with round-half-to-even, then stripped of trailing zeros.

use chrono::TimeDelta;
use rust_decimal::{Decimal, RoundingStrategy};

use super::constants::{HALF_STEP, HUNDRED, RATIO_SCALE};

/// Divide and round to four fractional digits, half-to-even, trailing zeros stripped.
///
/// Returns `None` when `divisor` is zero.
pub fn divide(dividend: Decimal, divisor: Decimal) -> Option<Decimal> {
    let quotient = dividend.checked_div(divisor)?;
    let truncated = quotient.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::ToZero);

    let rounded = if (quotient - truncated).abs() == HALF_STEP {
        resolve_half_step(dividend, divisor, quotient)
    } else {
        quotient.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointNearestEven)
    };

    Some(rounded.normalize())
}

/// `quotient` landed exactly on a half step, but it is itself rounded to 28
/// significant digits. Decide the direction from the exact remainder.
fn resolve_half_step(dividend: Decimal, divisor: Decimal, quotient: Decimal) -> Decimal {
    let Some(product) = quotient.checked_mul(divisor) else {
        return quotient.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointNearestEven);
    };
    let remainder = dividend - product;

    if remainder.is_zero() {
        quotient.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointNearestEven)
    } else if remainder.is_sign_positive() == divisor.is_sign_positive() {
        quotient.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::ToPositiveInfinity)
    } else {
        quotient.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::ToNegativeInfinity)
    }
}

/// `part / whole` as a rounded fraction, scaled to a percentage.
pub fn percent(part: u64, whole: u64) -> Option<Decimal> {
    divide(Decimal::from(part), Decimal::from(whole)).map(|fraction| (fraction * HUNDRED).normalize())
}

/// Arithmetic mean of `count` items with the given `sum`.
pub fn mean(sum: Decimal, count: u64) -> Option<Decimal> {
    divide(sum, Decimal::from(count))
}

/// Mean duration, truncated to whole nanoseconds. Totals too large for
/// nanosecond arithmetic are averaged in milliseconds.
pub fn mean_duration(total: TimeDelta, count: u64) -> Option<TimeDelta> {
    if count == 0 {
        return None;
    }
    let count = i64::try_from(count).ok()?;
    Some(match total.num_nanoseconds() {
        Some(nanos) => TimeDelta::nanoseconds(nanos / count),
        None => TimeDelta::milliseconds(total.num_milliseconds() / count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_divide_rounds_to_four_places() {
        assert_eq!(divide(dec!(1), dec!(3)), Some(dec!(0.3333)));
        assert_eq!(divide(dec!(2), dec!(3)), Some(dec!(0.6667)));
        assert_eq!(divide(dec!(-2), dec!(3)), Some(dec!(-0.6667)));
        assert_eq!(divide(dec!(-2809.54), dec!(14)), Some(dec!(-200.6814)));
        assert_eq!(divide(dec!(2101.29), dec!(-2809.54)), Some(dec!(-0.7479)));
    }

    #[test]
    fn test_divide_half_to_even() {
        // 0.00025 -> 0.0002, 0.00075 -> 0.0008
        assert_eq!(divide(dec!(1), dec!(4000)), Some(dec!(0.0002)));
        assert_eq!(divide(dec!(3), dec!(4000)), Some(dec!(0.0008)));
        assert_eq!(divide(dec!(-1), dec!(4000)), Some(dec!(-0.0002)));
        assert_eq!(divide(dec!(1.00005), dec!(1)), Some(dec!(1)));
        assert_eq!(divide(dec!(1.00015), dec!(1)), Some(dec!(1.0002)));
    }

    #[test]
    fn test_divide_resolves_rounded_half_step() {
        // The 28-digit quotient is exactly 0.00005, the exact value sits just above it.
        let divisor = dec!(19999.9999999999999999999996);
        assert_eq!(divide(dec!(1), divisor), Some(dec!(0.0001)));
    }

    #[test]
    fn test_divide_strips_trailing_zeros() {
        let Some(value) = divide(dec!(6), dec!(20)) else {
            panic!("division by non-zero should succeed");
        };
        assert_eq!(value.to_string(), "0.3");

        let Some(whole) = divide(dec!(10), dec!(5)) else {
            panic!("division by non-zero should succeed");
        };
        assert_eq!(whole.to_string(), "2");
        assert_eq!(whole.scale(), 0);
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(divide(dec!(1), Decimal::ZERO), None);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(6, 20), Some(dec!(30)));
        assert_eq!(percent(1, 3), Some(dec!(33.33)));
        assert_eq!(percent(6, 6).map(|p| p.to_string()), Some("100".to_string()));
        assert_eq!(percent(0, 5), Some(Decimal::ZERO));
        assert_eq!(percent(1, 0), None);
    }

    #[test]
    fn test_mean_duration() {
        assert_eq!(
            mean_duration(TimeDelta::hours(340), 3),
            Some(TimeDelta::milliseconds(408_000_000))
        );
        assert_eq!(
            mean_duration(TimeDelta::seconds(1), 3),
            Some(TimeDelta::nanoseconds(333_333_333))
        );
        assert_eq!(mean_duration(TimeDelta::hours(1), 0), None);
    }

    #[test]
    fn test_mean_duration_keeps_sub_millisecond_precision() {
        assert_eq!(
            mean_duration(TimeDelta::microseconds(3_000), 2),
            Some(TimeDelta::microseconds(1_500))
        );
    }

    #[test]
    fn test_mean_duration_beyond_nanosecond_range() {
        // 400 years of holding time does not fit in i64 nanoseconds.
        let total = TimeDelta::days(146_100);
        assert_eq!(mean_duration(total, 2), Some(TimeDelta::days(73_050)));
    }
}
