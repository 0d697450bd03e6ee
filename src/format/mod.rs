//! Display helpers for amounts, dates, and percentages.

pub mod table;

use chrono::{DateTime, Utc};

pub use table::{Alignment, Table, TableColumn};

/// Decimal and grouping separators for a locale tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl NumberLocale {
    /// Resolves a BCP 47 tag such as `en-US` or `pt-PT`. Unknown languages
    /// use English separators.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" => Self {
                decimal_separator: ',',
                grouping_separator: '.',
            },
            "fr" => Self {
                decimal_separator: ',',
                grouping_separator: ' ',
            },
            _ => Self::default(),
        }
    }
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "JPY" => "¥",
        _ => code,
    }
}

fn minor_units_for(code: &str) -> usize {
    match code {
        "JPY" => 0,
        _ => 2,
    }
}

/// Formats `amount` with the currency symbol in front and the sign before
/// the symbol, e.g. `€1,234.56` and `-€50.00`.
pub fn format_currency(amount: f64, currency: &str, locale: &NumberLocale) -> String {
    let precision = minor_units_for(currency);
    let body = format_number(amount.abs(), precision, locale);
    let sign = if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{body}", symbol_for(currency))
}

/// Formats a non-negative number with grouping applied to the integer part.
pub fn format_number(value: f64, precision: usize, locale: &NumberLocale) -> String {
    let fixed = format!("{value:.precision$}");
    let (int_part, fraction) = match fixed.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    let mut body = group_digits(int_part, locale.grouping_separator);
    if let Some(fraction) = fraction {
        body.push(locale.decimal_separator);
        body.push_str(fraction);
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// `Jan 15, 2024`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Percentage with one decimal, e.g. `25.0%`.
pub fn format_share(share: f64) -> String {
    format!("{share:.1}%")
}
