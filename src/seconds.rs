//! Start offset parsing.
//!
//! Offsets are typed as free text by the user and end up as `-ss <seconds>`
//! input options. [`parse_offset`] turns that text into an optional
//! [`Seconds`] value: blank text and zero both mean "no offset".
//!
//! # Example
//!
//! ```
//! use movmux::NumberLocale;
//! use movmux::seconds::parse_offset;
//!
//! let locale = NumberLocale::invariant();
//! assert_eq!(parse_offset(Some("2.5"), locale)?.unwrap().to_string(), "2.5");
//! assert!(parse_offset(Some("0"), locale)?.is_none());
//! assert!(parse_offset(None, locale)?.is_none());
//! # Ok::<(), movmux::OffsetError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::configuration::NumberLocale;
use crate::error::OffsetError;

/// A strictly positive, finite number of seconds.
///
/// Only [`parse_offset`] creates values, so a `Seconds` is never zero,
/// negative, or non-finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Seconds(f64);

impl Seconds {
    /// The offset in seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// The offset as a [`Duration`].
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Display for Seconds {
    /// At most three fractional digits, trailing zeros trimmed, `.` as the
    /// decimal point: `2.5`, `2`, `0.333`.
    ///
    /// The value is first cut to 15 significant digits, then rounded half
    /// away from zero, so `1.0625` renders as `1.063` and `1.0005` as
    /// `1.001`.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&render_millis(self.0))
    }
}

/// Largest decimal exponent that still leaves a fractional digit among the
/// 15 significant ones.
const MAX_FRACTIONAL_EXPONENT: i32 = 14;

fn render_millis(value: f64) -> String {
    // `d.dddddddddddddde<exponent>`
    let scientific = format!("{:.14e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{value:.3}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{value:.3}");
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    if exponent > MAX_FRACTIONAL_EXPONENT {
        let zeros = (exponent - MAX_FRACTIONAL_EXPONENT) as usize;
        return format!("{digits}{}", "0".repeat(zeros));
    }

    // Number of leading digits up to and including the thousandths place.
    let keep = exponent + 4;
    if keep < 0 {
        return "0".to_string();
    }

    let keep = keep as usize;
    let (head, tail) = digits.split_at(keep.min(digits.len()));
    let padding = 10_u64.pow((keep - head.len()) as u32);
    let mut millis = head.parse::<u64>().unwrap_or(0) * padding;
    if tail.as_bytes().first().is_some_and(|digit| *digit >= b'5') {
        millis += 1;
    }

    let fixed = format!("{}.{:03}", millis / 1000, millis % 1000);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Parse an optional offset.
///
/// Blank or absent text yields `Ok(None)`. Otherwise the trimmed text is
/// parsed with the invariant format and, failing that, with `locale`.
/// A parsed value of exactly zero also yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`OffsetError::InvalidFormat`] if neither format matches and
/// [`OffsetError::Negative`] if the value is below zero.
pub fn parse_offset(
    text: Option<&str>,
    locale: NumberLocale,
) -> Result<Option<Seconds>, OffsetError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let value = parse_invariant(text)
        .or_else(|| parse_localized(text, locale))
        .ok_or(OffsetError::InvalidFormat)?;

    if value < 0.0 {
        return Err(OffsetError::Negative);
    }

    // Also catches -0.
    if value == 0.0 {
        return Ok(None);
    }

    Ok(Some(Seconds(value)))
}

/// Sign, digits, `.` fraction and exponent. No group separators, no
/// `inf`/`NaN`.
fn parse_invariant(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_localized(text: &str, locale: NumberLocale) -> Option<f64> {
    let separator = locale.decimal_separator();
    if separator == '.' || text.contains('.') {
        return None;
    }

    parse_invariant(&text.replace(separator, "."))
}
