//! Rounding to a fixed number of significant digits.
//!
//! Hand calculation keeps a fixed number of significant digits after every
//! operation. [`round_to_significant_digits`] reproduces that: it rounds to
//! the nearest value with `digits` significant digits and breaks ties toward
//! the even neighbour.
//!
//! The decision is read off the exact decimal expansion of the input, and
//! the rounded decimal is converted back to `f64` in a single correctly
//! rounded step. No power of ten is ever materialised as an `f64`, so the
//! result is the nearest representable value at every exponent, subnormals
//! included. A discarded tail within [`TIE_TOLERANCE`] of one half is
//! treated as an exact tie. This absorbs binary representation error, so
//! both `1.25` and `1.35` are recognised as halves.

use crate::error::{NumericalError, Result};

/// Absolute distance from one half within which a fractional part is a tie.
pub const TIE_TOLERANCE: f64 = 1e-12;

/// Every finite `f64` round-trips through this many significant digits.
const ROUND_TRIP_DIGITS: u32 = 17;

/// Significant digits of the expansion the rounding decision reads.
const EXPANSION_DIGITS: usize = 40;

/// Round `value` to `digits` significant digits, ties to even.
///
/// Zero and non-finite values are returned unchanged. A value that rounds
/// past `f64::MAX` becomes infinite.
///
/// # Errors
///
/// Returns [`NumericalError::InvalidArgument`] if `digits` is zero.
///
/// # Example
///
/// ```
/// use nm_core::round_to_significant_digits;
///
/// assert_eq!(round_to_significant_digits(1.25, 2).unwrap(), 1.2);
/// assert_eq!(round_to_significant_digits(1350.0, 2).unwrap(), 1400.0);
/// assert_eq!(round_to_significant_digits(1.23456e-300, 2).unwrap(), 1.2e-300);
/// ```
pub fn round_to_significant_digits(value: f64, digits: u32) -> Result<f64> {
    if digits == 0 {
        return Err(NumericalError::invalid_argument(
            "significant digits must be positive",
        ));
    }
    Ok(round_significant(value, digits))
}

/// Infallible core of [`round_to_significant_digits`] for callers that have
/// already validated the digit count. A zero count leaves `value` unchanged.
pub(crate) fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 || digits >= ROUND_TRIP_DIGITS {
        return value;
    }

    match round_magnitude(value.abs(), digits as usize) {
        Some(rounded) => rounded.copysign(value),
        None => value,
    }
}

/// Round a positive finite magnitude. `None` only if the formatter's output
/// does not have the `d.ddd…e±x` shape.
fn round_magnitude(magnitude: f64, digits: usize) -> Option<f64> {
    // Float formatting is exact to the requested precision.
    let expansion = format!("{:.*e}", EXPANSION_DIGITS, magnitude);
    let (mantissa, exponent) = expansion.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;

    let significand: String = mantissa.chars().filter(|c| *c != '.').collect();
    let (kept, tail) = significand.split_at(digits);
    let mut integer: u64 = kept.parse().ok()?;
    let fraction: f64 = format!("0.{tail}").parse().ok()?;

    let round_up = if fraction > 0.5 + TIE_TOLERANCE {
        true
    } else if fraction < 0.5 - TIE_TOLERANCE {
        false
    } else {
        integer % 2 == 1
    };
    if round_up {
        integer += 1;
    }

    // integer · 10^(exponent - digits + 1), rounded once by the parser.
    format!("{integer}e{}", exponent - (digits as i32 - 1))
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn round(value: f64, digits: u32) -> f64 {
        round_to_significant_digits(value, digits).expect("digits are positive")
    }

    #[test]
    fn test_ties_go_to_even() {
        assert_relative_eq!(round(1.25, 2), 1.2);
        assert_relative_eq!(round(1.35, 2), 1.4);
        assert_relative_eq!(round(1250.0, 2), 1200.0);
        assert_relative_eq!(round(1350.0, 2), 1400.0);
        assert_relative_eq!(round(0.125, 2), 0.12);
    }

    #[test]
    fn test_non_ties_round_to_nearest() {
        assert_relative_eq!(round(0.012349, 3), 0.0123);
        assert_relative_eq!(round(0.012351, 3), 0.0124);
        assert_relative_eq!(round(3.14159265, 4), 3.142);
        assert_relative_eq!(round(98765.0, 2), 99000.0);
    }

    #[test]
    fn test_sign_is_preserved() {
        assert_relative_eq!(round(-1.25, 2), -1.2);
        assert_relative_eq!(round(-1350.0, 2), -1400.0);
        assert_relative_eq!(round(-0.012351, 3), -0.0124);
    }

    #[test]
    fn test_zero_and_non_finite_pass_through() {
        assert_eq!(round(0.0, 3), 0.0);
        assert!(round(f64::NAN, 3).is_nan());
        assert_eq!(round(f64::INFINITY, 3), f64::INFINITY);
        assert_eq!(round(f64::NEG_INFINITY, 3), f64::NEG_INFINITY);
    }

    #[test]
    fn test_zero_digits_rejected() {
        assert!(matches!(
            round_to_significant_digits(1.0, 0),
            Err(NumericalError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let samples = [
            1.25, 1.35, 2.675, -7.0 / 3.0, 1e-9 / 7.0, 123456.789, 0.1 + 0.2, 6.02214076e23,
            -9.99999, 42.0,
        ];
        for &v in &samples {
            for d in 1..=12 {
                let once = round(v, d);
                assert_eq!(round(once, d), once, "value {v}, digits {d}");
            }
        }
    }

    #[test]
    fn test_extreme_exponents_round_to_nearest() {
        assert_eq!(round(1.23456e-300, 2), 1.2e-300);
        assert_eq!(round(1.23456e-21, 3), 1.23e-21);
        assert_eq!(round(1.23456e24, 2), 1.2e24);
        assert_eq!(round(-9.87654e200, 3), -9.88e200);
    }

    #[test]
    fn test_subnormal_is_rounded() {
        assert_eq!(round(1.23456e-310, 2), 1.2e-310);
        assert_eq!(round(-1.23456e-310, 3), -1.23e-310);
    }

    #[test]
    fn test_matches_decimal_formatting_across_exponents() {
        // 1.23456 is never a tie at these digit counts, so the formatter's
        // own rounding gives the expected value.
        for exponent in -300..=300 {
            let v: f64 = format!("1.23456e{exponent}").parse().unwrap();
            for digits in [2u32, 3, 5] {
                let expected: f64 = format!("{:.*e}", digits as usize - 1, v).parse().unwrap();
                assert_eq!(round(v, digits), expected, "1.23456e{exponent} at {digits} digits");
            }
        }
    }

    #[test]
    fn test_rounding_carries_into_next_decade() {
        assert_eq!(round(9.96, 2), 10.0);
        assert_eq!(round(0.0999999, 3), 0.1);
    }

    #[test]
    fn test_full_precision_is_identity() {
        let v = 0.1 + 0.2;
        assert_eq!(round(v, 17), v);
    }
}
