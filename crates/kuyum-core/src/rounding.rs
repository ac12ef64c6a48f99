//! # Rounding
//!
//! Every reported weight and price is rounded to two decimals.
//!
//! ## Rounding Rule
//! ```text
//! round2(x) = round(x × 100) / 100      (half away from zero)
//!
//!   3.125  → 312.5  → 313  → 3.13
//!  -3.125  → -312.5 → -313 → -3.13
//! ```
//!
//! Rounding happens only at the reporting boundary. Intermediate stages are
//! always carried in full precision so rounding error never compounds.

/// Rounds to two decimal places, half away from zero.
///
/// ## Example
/// ```rust
/// use kuyum_core::rounding::round2;
///
/// assert_eq!(round2(3.125), 3.13);
/// assert_eq!(round2(558.7425), 558.74);
/// ```
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(2.5), 2.5);
    }

    #[test]
    fn test_round2_truncates_below_half() {
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(653.5), 653.5);
    }

    #[test]
    fn test_round2_zero() {
        assert_eq!(round2(0.0), 0.0);
    }
}
