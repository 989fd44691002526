//! Formatting and pagination helpers shared by the report builders

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rendered in place of a value that is absent on one side of a comparison
pub const PLACEHOLDER: &str = "—";

/// Number rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberStyle {
    pub decimal_places: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Currency symbol; `None` renders the bare number
    pub symbol: Option<String>,
    pub symbol_before: bool,
}

impl Default for NumberStyle {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            symbol: None,
            symbol_before: true,
        }
    }
}

impl NumberStyle {
    /// Same separators, no currency symbol
    pub fn plain(&self) -> Self {
        Self {
            symbol: None,
            ..self.clone()
        }
    }
}

/// Insert a separator every three digits, counting from the right
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

fn render(value: Decimal, places: u32, pad: bool, style: &NumberStyle) -> String {
    let mut rounded = value.round_dp(places);
    if !pad {
        rounded = rounded.normalize();
    }
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.to_string()),
        None => (text.as_str(), String::new()),
    };

    let mut frac = frac_part;
    if pad {
        while frac.len() < places as usize {
            frac.push('0');
        }
    }

    let mut number = group_thousands(int_part, &style.thousands_separator);
    if !frac.is_empty() {
        number.push_str(&style.decimal_separator);
        number.push_str(&frac);
    }

    let body = match &style.symbol {
        Some(symbol) if style.symbol_before => format!("{} {}", symbol, number),
        Some(symbol) => format!("{} {}", number, symbol),
        None => number,
    };

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a monetary amount with fixed decimal places
pub fn format_amount(value: Decimal, style: &NumberStyle) -> String {
    render(value, style.decimal_places, true, style)
}

/// Format an amount that may be missing, rendering [`PLACEHOLDER`] when it is
pub fn format_optional(value: Option<Decimal>, style: &NumberStyle) -> String {
    match value {
        Some(v) => format_amount(v, style),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a ratio as a plain number with at most two fraction digits
pub fn format_number(value: Option<Decimal>, style: &NumberStyle) -> String {
    match value {
        Some(v) => render(v, 2, false, &style.plain()),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format an indicator value.
///
/// Values within [-1, 1] are ratios and are shown as a percentage; anything
/// larger is shown as a plain number. At most two fraction digits are kept.
pub fn format_indicator(value: Option<Decimal>, style: &NumberStyle) -> String {
    let plain = style.plain();
    match value {
        None => PLACEHOLDER.to_string(),
        Some(v) if v.abs() <= Decimal::ONE => {
            format!("{}%", render(v * Decimal::ONE_HUNDRED, 2, false, &plain))
        }
        Some(v) => render(v, 2, false, &plain),
    }
}

/// One page of a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually returned
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Slice `items` into 1-based pages.
///
/// Page 0 is treated as page 1 and pages past the end clamp to the last page.
/// An empty list still yields a single empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());

    Page {
        items: items[start.min(end)..end].to_vec(),
        page,
        per_page,
        total_pages,
        total_count: items.len(),
    }
}
