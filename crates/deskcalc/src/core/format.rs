//! Display formatting for numbers
//!
//! Integral values are grouped exactly from their digits, so a 16-digit
//! operand never loses precision on screen. Fractional values are rounded
//! to a fixed number of places, trimmed, and grouped on the integer part.

use serde::{Deserialize, Serialize};

/// A plain decimal literal: `-?digits[.digits]` with at least one digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlainDecimal<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
}

impl<'a> PlainDecimal<'a> {
    /// Splits `raw` into sign, integer digits and fraction digits
    pub(crate) fn parse(raw: &'a str) -> Option<Self> {
        let (negative, body) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(integer) || !all_digits(fraction) {
            return None;
        }
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        Some(Self {
            negative,
            integer,
            fraction,
        })
    }

    /// The literal with a leading `0` and no dangling `.` (`-.5` → `-0.5`)
    pub(crate) fn canonical(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        let integer = if self.integer.is_empty() { "0" } else { self.integer };
        if self.fraction.is_empty() {
            format!("{sign}{integer}")
        } else {
            format!("{sign}{integer}.{}", self.fraction)
        }
    }

    fn is_integral(&self) -> bool {
        self.fraction.bytes().all(|b| b == b'0')
    }

    fn grouped_integer(&self) -> String {
        let grouped = group_thousands(self.integer);
        if self.negative && grouped != "0" {
            format!("-{grouped}")
        } else {
            grouped
        }
    }
}

/// Formats raw operand text for the main display and memory line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFormatter {
    fraction_digits: usize,
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayFormatter {
    /// Fractional digits shown by default
    pub const DEFAULT_FRACTION_DIGITS: usize = 10;

    /// Creates a formatter showing up to 10 fractional digits
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fraction_digits: Self::DEFAULT_FRACTION_DIGITS,
        }
    }

    /// Creates a formatter with a custom fractional precision
    #[must_use]
    pub const fn with_fraction_digits(fraction_digits: usize) -> Self {
        Self { fraction_digits }
    }

    /// Returns the fractional precision
    #[must_use]
    pub const fn fraction_digits(&self) -> usize {
        self.fraction_digits
    }

    /// Formats `raw`, returning it unchanged if it is not a plain decimal
    #[must_use]
    pub fn format(&self, raw: &str) -> String {
        let Some(number) = PlainDecimal::parse(raw) else {
            return raw.to_string();
        };

        if number.is_integral() {
            return number.grouped_integer();
        }

        let Ok(value) = raw.parse::<f64>() else {
            return raw.to_string();
        };

        let fixed = format!("{:.*}", self.fraction_digits, value);
        let trimmed = if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.')
        } else {
            fixed.as_str()
        };

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (integer, fraction) = match body.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (body, None),
        };

        let grouped = group_thousands(integer);
        let mut out = String::with_capacity(trimmed.len() + trimmed.len() / 3 + 1);
        if negative && !(grouped == "0" && fraction.is_none()) {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

/// Formats `raw` with the default formatter
#[must_use]
pub fn format_number(raw: &str) -> String {
    DisplayFormatter::new().format(raw)
}

/// Inserts a comma every three digits from the right, dropping leading zeros
fn group_thousands(digits: &str) -> String {
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }

    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
