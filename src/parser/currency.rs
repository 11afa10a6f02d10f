//! Currency amount parsing for European and American number conventions.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::core::currencies::CURRENCY_SYMBOLS;

// 1.234.567,89
static EUROPEAN_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,3}(\.[0-9]{3})*,[0-9]{2}$").unwrap());
// 123,45
static EUROPEAN_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+,[0-9]{2}$").unwrap());
// 1,234,567.89
static AMERICAN_GROUPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,3}(,[0-9]{3})*\.[0-9]{2}$").unwrap());
// 123.45
static AMERICAN_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").unwrap());
static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)").unwrap());

/// Which convention an amount string was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    European,
    American,
    Integer,
    /// No known pattern: commas dropped, dots kept, leading number taken.
    Unrecognized,
}

/// Detect the number convention of an already cleaned, unsigned amount.
pub fn detect_format(cleaned: &str) -> NumberFormat {
    if EUROPEAN_GROUPED.is_match(cleaned) || EUROPEAN_PLAIN.is_match(cleaned) {
        NumberFormat::European
    } else if AMERICAN_GROUPED.is_match(cleaned) || AMERICAN_PLAIN.is_match(cleaned) {
        NumberFormat::American
    } else if INTEGER.is_match(cleaned) {
        NumberFormat::Integer
    } else {
        NumberFormat::Unrecognized
    }
}

/// Parse a currency string such as `"€1.234,56"`, `"$1,234.56"` or `"-123,45 €"`.
///
/// Returns `None` for anything that does not yield a number: empty input,
/// whitespace, bare symbols, or text. Never panics.
pub fn parse_currency(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let negative = cleaned.contains('-');
    let magnitude: String = cleaned.chars().filter(|&c| c != '-').collect();

    let normalized = match detect_format(&magnitude) {
        NumberFormat::European => magnitude.replace('.', "").replacen(',', ".", 1),
        NumberFormat::American => magnitude.replace(',', ""),
        NumberFormat::Integer => magnitude,
        NumberFormat::Unrecognized => magnitude.replace(',', ""),
    };

    let number = LEADING_NUMBER.find(&normalized)?.as_str();
    let number = number.trim_end_matches('.');
    let value = if let Some(fraction) = number.strip_prefix('.') {
        Decimal::from_str(&format!("0.{fraction}"))
    } else {
        Decimal::from_str(number)
    }
    .ok()?;

    Some(if negative { -value } else { value })
}
