//! Currency symbols and ISO 4217 codes seen on scanned receipts.

/// Symbols stripped from amounts before numeric parsing.
pub const CURRENCY_SYMBOLS: [char; 5] = ['€', '$', '£', '¥', '₹'];

/// Map a currency symbol to its ISO 4217 code.
///
/// `$` and `¥` are ambiguous on receipts; they resolve to USD and JPY.
pub fn currency_for_symbol(symbol: char) -> Option<&'static str> {
    match symbol {
        '€' => Some("EUR"),
        '$' => Some("USD"),
        '£' => Some("GBP"),
        '¥' => Some("JPY"),
        '₹' => Some("INR"),
        _ => None,
    }
}

/// Return the canonical static code if `code` is a known ISO 4217 code.
pub fn known_currency_code(code: &str) -> Option<&'static str> {
    CURRENCY_CODES
        .binary_search(&code)
        .ok()
        .map(|i| CURRENCY_CODES[i])
}

/// Currencies of EU member states and common travel currencies.
/// Sorted for binary search.
static CURRENCY_CODES: &[&str] = &[
    "AUD", "BGN", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HUF", "INR", "JPY", "NOK",
    "PLN", "RON", "SEK", "TRY", "USD",
];
