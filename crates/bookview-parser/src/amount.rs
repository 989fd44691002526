//! Tolerant decoding of monetary values found in collaborator payloads

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Result of decoding a payload value that should hold an amount
#[derive(Debug, Clone, PartialEq)]
pub enum AmountValue {
    /// Absent or null
    Missing,
    Number(Decimal),
    /// Present but not numeric; carries the raw text
    Invalid(String),
}

impl AmountValue {
    /// The decoded number, with missing and invalid values read as zero
    pub fn or_zero(&self) -> Decimal {
        match self {
            AmountValue::Number(d) => *d,
            _ => Decimal::ZERO,
        }
    }
}

static NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d.,\-]").unwrap());
static CANONICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());

/// Decode a JSON value into an amount
pub fn decode_amount(value: &Value) -> AmountValue {
    match value {
        Value::Null => AmountValue::Missing,
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(AmountValue::Number)
                .unwrap_or(AmountValue::Invalid(text))
        }
        Value::String(s) => match parse_amount(s) {
            Some(d) => AmountValue::Number(d),
            None if s.trim().is_empty() => AmountValue::Missing,
            None => AmountValue::Invalid(s.clone()),
        },
        other => AmountValue::Invalid(other.to_string()),
    }
}

/// Parse amount text such as `"1234.56"`, `"R$ 1.234,56"` or `"-1,234.56 BRL"`.
///
/// When both `.` and `,` appear, the last one is the decimal separator and the
/// other groups thousands. A separator that appears several times groups
/// thousands. A single `,` is the decimal comma. A single `.` followed by
/// exactly three digits after a one to three digit integer without a leading
/// zero (`"1.234"`, not `"0.125"`) groups thousands, as amounts are written
/// in pt-BR; otherwise it is the decimal point. Malformed grouping is rejected.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned = NOISE.replace_all(text.trim(), "");
    let (sign, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", &*cleaned),
    };
    if digits.is_empty() {
        return None;
    }

    let (integer, fraction) = match (digits.rfind('.'), digits.rfind(',')) {
        (Some(dot), Some(comma)) => {
            let (group, point) = if comma > dot { ('.', comma) } else { (',', dot) };
            (ungroup(&digits[..point], group)?, Some(&digits[point + 1..]))
        }
        (Some(point), None) => split_single(digits, '.', point)?,
        (None, Some(point)) => split_single(digits, ',', point)?,
        (None, None) => (digits.to_string(), None),
    };

    let normalized = match fraction {
        Some(fraction) => format!("{}{}.{}", sign, integer, fraction),
        None => format!("{}{}", sign, integer),
    };
    if !CANONICAL.is_match(&normalized) {
        return None;
    }

    Decimal::from_str(&normalized).ok()
}

/// Integer and fraction parts when only one kind of separator is present
fn split_single(digits: &str, separator: char, point: usize) -> Option<(String, Option<&str>)> {
    if digits.matches(separator).count() > 1 {
        return Some((ungroup(digits, separator)?, None));
    }

    let (integer, fraction) = (&digits[..point], &digits[point + 1..]);
    let grouped = separator == '.'
        && fraction.len() == 3
        && (1..=3).contains(&integer.len())
        && !integer.starts_with('0');
    if grouped {
        log::debug!(target: "bookview::data", "{:?} read as thousands grouping", digits);
        return Some((format!("{}{}", integer, fraction), None));
    }

    Some((integer.to_string(), Some(fraction)))
}

/// Drop thousands separators, checking that every group after the first has three digits
fn ungroup(integer: &str, separator: char) -> Option<String> {
    let mut groups = integer.split(separator);
    let first = groups.next()?;
    if first.is_empty() || (first.len() > 3 && integer.contains(separator)) {
        return None;
    }

    let mut joined = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        joined.push_str(group);
    }
    Some(joined)
}
