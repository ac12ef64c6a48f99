//! # Raw Input Coercion
//!
//! The UI hands over whatever the user typed. This module turns that text
//! into numbers in three different ways, each for one consumer:
//!
//! ```text
//! ┌──────────────────────┬────────────────────┬──────────────────────────┐
//! │ function             │ "" / "-" / "abc"   │ used by                  │
//! ├──────────────────────┼────────────────────┼──────────────────────────┤
//! │ parse_number_field   │ None / Err / Err   │ validation schema        │
//! │ coerce_number        │ 0 / 0 / 0          │ the calculation gate     │
//! │ commit_percentage    │ 0 / 0 / 0, clamped │ settings on blur/commit  │
//! └──────────────────────┴────────────────────┴──────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::clamp_percentage;
use crate::validation::ValidationResult;

/// Parses a numeric form field for validation.
///
/// ## Returns
/// - `Ok(None)` for empty or whitespace-only text (field absent)
/// - `Ok(Some(x))` for a finite number
/// - `Err(NotANumber)` for anything else, including `inf` and `NaN`
pub fn parse_number_field(field: &str, raw: &str) -> ValidationResult<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ValidationError::NotANumber {
            field: field.to_string(),
        }),
    }
}

/// Coerces raw text to a number, treating anything unreadable as 0.
///
/// The calculation gate runs on these values, regardless of whether the
/// schema accepted the field.
///
/// ## Example
/// ```rust
/// use kuyum_core::input::coerce_number;
///
/// assert_eq!(coerce_number("12.5"), 12.5);
/// assert_eq!(coerce_number(""), 0.0);
/// assert_eq!(coerce_number("twelve"), 0.0);
/// ```
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Commits a percentage typed into a settings field.
///
/// The longest leading number is used, so trailing junk such as a `%` sign
/// is ignored. Text without a leading number commits as 0; every other
/// value is clamped to [0, 100].
///
/// ## Example
/// ```rust
/// use kuyum_core::input::commit_percentage;
///
/// assert_eq!(commit_percentage("12.5"), 12.5);
/// assert_eq!(commit_percentage("12abc"), 12.0);
/// assert_eq!(commit_percentage("-"), 0.0);
/// assert_eq!(commit_percentage("250"), 100.0);
/// ```
pub fn commit_percentage(raw: &str) -> f64 {
    leading_number(raw.trim()).map_or(0.0, clamp_percentage)
}

/// Reads the longest prefix of `raw` that forms a decimal number.
fn leading_number(raw: &str) -> Option<f64> {
    let bytes = raw.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut mantissa_digits = digits_from(end);
    end += mantissa_digits;
    if bytes.get(end) == Some(&b'.') {
        let fraction = digits_from(end + 1);
        mantissa_digits += fraction;
        end += 1 + fraction;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    raw[..end].parse().ok()
}
