//! Countries relevant to EU VAT refund submissions.

/// Countries whose refund procedure accepts submissions from this engine.
pub const SUBMISSION_COUNTRIES: [&str; 3] = ["AT", "DE", "FR"];

/// Check whether `code` is an EU member state (ISO 3166-1 alpha-2, with
/// Greece as `GR`).
pub fn is_eu_member_state(code: &str) -> bool {
    EU_MEMBER_STATES.binary_search(&code).is_ok()
}

/// Check whether refund submissions may be requested for `code`.
pub fn is_submission_country(code: &str) -> bool {
    SUBMISSION_COUNTRIES.contains(&code)
}

/// The 27 EU member states. Sorted for binary search.
static EU_MEMBER_STATES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GR", "HR", "HU", "IE",
    "IT", "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
];
