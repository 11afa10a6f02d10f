//! Recognition output parsing.
//!
//! Turns the typed key/text entities returned by the document-recognition
//! service into an [`ExtractedDocument`](crate::core::ExtractedDocument):
//! header strings, currency amounts, and unclassified line items.
//!
//! Parsing never fails on a single bad field. Unparseable amounts come back
//! as `None` or [`ParsedAmount::Unparseable`](crate::core::ParsedAmount) so the
//! rest of the document is still extracted.
//!
//! # Example
//!
//! ```
//! use erstattung::core::RawEntity;
//! use erstattung::parser::{parse_currency, parse_entities};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(parse_currency("€1.234,56"), Some(dec!(1234.56)));
//! assert_eq!(parse_currency("$1,234.56"), Some(dec!(1234.56)));
//! assert_eq!(parse_currency("n/a"), None);
//!
//! let doc = parse_entities(
//!     &[
//!         RawEntity::new("invoice_id", "INV-7"),
//!         RawEntity::new("line_item", "Taxi €20.00 + 19% VAT"),
//!     ],
//!     "uploads/receipt.pdf",
//! );
//! assert_eq!(doc.line_items[0].vat_amount, dec!(3.8));
//! ```

mod currency;
mod entities;
mod line_item;

pub use currency::{NumberFormat, detect_format, parse_currency};
#[cfg(feature = "json")]
pub use entities::parse_recognition_json;
pub use entities::{line_item_from_text, parse_document_ai_entities, parse_entities};
pub use line_item::{ParsedLineItem, parse_line_item};
