//! Decimal constants for statistics calculations.

use rust_decimal::Decimal;

/// Fractional digits kept by every derived ratio.
pub const RATIO_SCALE: u32 = 4;
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
/// Half of one unit in the last kept digit (0.00005).
pub const HALF_STEP: Decimal = Decimal::from_parts(5, 0, 0, false, RATIO_SCALE + 1);
