//! EU VAT refundability rules.
//!
//! Classifies line-item descriptions into refundable categories with an EU
//! sub-code, or into restricted categories (alcohol, entertainment and gifts,
//! tobacco and gambling) that are never refundable.
//!
//! # Example
//!
//! ```
//! use erstattung::rules::*;
//!
//! let hotel = check_refundability("Hotel accommodation, 2 nights");
//! assert!(hotel.is_refundable);
//! assert_eq!(hotel.eu_sub_code, Some(EuSubCode::HotelAccommodation));
//!
//! // restricted keywords always win
//! assert!(!check_refundability("hotel restaurant alcohol service").is_refundable);
//! ```

mod refundability;
mod sub_codes;
mod validate;

pub use refundability::{
    ExpenseCategory, RefundabilityInput, RefundabilityOutcome, RefundabilityResult,
    apply_refundability_rules, check_refundability, classify,
};
pub use sub_codes::{ALL_EU_SUB_CODES, EuSubCode, available_eu_sub_codes, is_valid_eu_sub_code};
pub use validate::{DocumentValidation, validate_line_items};
