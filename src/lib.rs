//! # erstattung
//!
//! Document engine for EU cross-border VAT refund claims: parse recognised
//! invoices, classify each line as refundable or not, drive documents through
//! their review lifecycle, and aggregate ready documents into a quarterly
//! refund application.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use erstattung::core::*;
//! use erstattung::parser::parse_entities;
//! use erstattung::rules::validate_line_items;
//! use rust_decimal_macros::dec;
//!
//! let mut doc = Document::uploaded(
//!     "doc-1", "tenant-a", "user-1", "DE",
//!     Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap(),
//! );
//! doc.attach_extracted(parse_entities(
//!     &[
//!         RawEntity::new("line_item", "Hotel accommodation €100,00 + 7% VAT"),
//!         RawEntity::new("line_item", "Minibar alcohol €20,00 + 19% VAT"),
//!     ],
//!     "doc-1",
//! ));
//!
//! let validation = validate_line_items(&doc.line_items);
//! doc.apply_validation(validation);
//!
//! assert_eq!(doc.status, DocumentStatus::ReadyForSubmission);
//! assert_eq!(doc.total_refundable_vat_amount, Some(dec!(7)));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, parsing, refundability rules, transition guard, aggregation |
//! | `json` | Decode raw recognition responses |
//! | `xml` | German UStVEU refund application |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod parser;

#[cfg(feature = "core")]
pub mod rules;

#[cfg(feature = "core")]
pub mod guard;

#[cfg(feature = "core")]
pub mod submission;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
