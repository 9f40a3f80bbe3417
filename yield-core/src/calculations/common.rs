//! Common helpers shared by the calculator and the presentation layer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yield_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(858.334)), dec!(858.33));
/// assert_eq!(round_half_up(dec!(858.335)), dec!(858.34));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a calculator output to a [`Decimal`] holding the exact binary
/// value of the double, so rounding decisions see what the float really is.
///
/// Returns `None` for NaN, infinities, and magnitudes a `Decimal` cannot hold.
pub fn exact_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
}

/// Formats a value with exactly two decimals.
///
/// Finite values go through [`round_half_up`]. A negative value that rounds
/// to zero keeps its sign (`-0.00`). Anything a `Decimal` cannot represent
/// falls back to the float formatter.
pub fn format_two_decimals(value: f64) -> String {
    match exact_decimal(value) {
        Some(decimal) => {
            let rounded = round_half_up(decimal);
            if value < 0.0 && rounded.is_zero() {
                format!("-{:.2}", rounded.abs())
            } else {
                format!("{rounded:.2}")
            }
        }
        None => format!("{value:.2}"),
    }
}
