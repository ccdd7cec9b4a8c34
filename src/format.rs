//! Human-readable byte and number formatting.
//!
//! Numbers use en-US grouping (`1,234.5`) with at most three fractional
//! digits; byte sizes step through binary units (B, KiB, MiB, GiB, TiB).

use regex::Regex;
use std::sync::LazyLock;

use crate::units::ByteUnit;

/// Maximum fractional digits shown for scaled values.
const MAX_FRACTION_DIGITS: usize = 3;

static BYTES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(-?[\d,]*\.?\d+)\s*(TiB|GiB|MiB|KiB|B)\b")
        .expect("byte size regex must compile")
});

/// Format a byte count with the largest binary unit that keeps the value >= 1.
///
/// ```
/// use rag_storage_calc::format::format_bytes;
///
/// assert_eq!(format_bytes(5_368_709_120.0), "5 GiB");
/// assert_eq!(format_bytes(1_500_000.0), "1.431 MiB");
/// assert_eq!(format_bytes(0.0), "0 B");
/// ```
pub fn format_bytes(bytes: f64) -> String {
    if bytes == 0.0 || !bytes.is_finite() {
        return "0 B".to_string();
    }

    let unit = ByteUnit::for_magnitude(bytes);
    let value = match unit {
        ByteUnit::B => format_with_digits(bytes.round(), 0),
        _ => format_number(bytes / unit.multiplier()),
    };

    format!("{value} {}", unit.label())
}

/// Format a number with thousands separators and up to three fractional digits.
pub fn format_number(n: f64) -> String {
    format_with_digits(n, MAX_FRACTION_DIGITS)
}

/// Parse strings produced by [`format_bytes`] back into a byte count.
///
/// Unit tokens are matched case-insensitively. Anything that does not contain
/// a `<number> <unit>` pair parses as `0.0`.
pub fn parse_bytes(s: &str) -> f64 {
    let Some(caps) = BYTES_PATTERN.captures(s) else {
        return 0.0;
    };

    let value: f64 = match caps[1].replace(',', "").parse() {
        Ok(v) => v,
        Err(_) => return 0.0,
    };

    match ByteUnit::from_label(&caps[2]) {
        Some(unit) => value * unit.multiplier(),
        None => 0.0,
    }
}

fn format_with_digits(n: f64, digits: usize) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", digits, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if n < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
