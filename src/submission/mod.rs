//! Quarterly refund submissions.
//!
//! A [`SubmissionRequest`] names tenant, country and quarter;
//! [`generate_aggregates`] folds the matching ready documents into
//! per-sub-code totals, and `xml::to_ustveu_xml` (feature `xml`) renders them
//! for the German tax authority.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use erstattung::core::{Document, DocumentStatus, LineItem};
//! use erstattung::rules::EuSubCode;
//! use erstattung::submission::*;
//! use rust_decimal_macros::dec;
//!
//! let mut doc = Document::uploaded(
//!     "doc-1", "tenant-a", "user-1", "DE",
//!     Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap(),
//! );
//! doc.status = DocumentStatus::ReadyForSubmission;
//! doc.line_items.push(LineItem {
//!     description: "Hotel accommodation".into(),
//!     net_amount: dec!(100),
//!     vat_amount: dec!(7),
//!     total_amount: dec!(107),
//!     is_refundable: Some(true),
//!     refundable_vat_amount: Some(dec!(7)),
//!     eu_sub_code: Some(EuSubCode::HotelAccommodation),
//!     ..Default::default()
//! });
//!
//! let request = SubmissionRequest::new("2025-Q4".parse()?, "DE", None, "tenant-a")?;
//! let summary = generate_aggregates(&[doc], &request)?;
//! assert_eq!(summary.total_refund_amount, dec!(7));
//! # Ok::<(), erstattung::core::ErstattungError>(())
//! ```

mod aggregate;
mod period;
mod request;
#[cfg(feature = "xml")]
pub mod xml;

pub use aggregate::{EuSubCodeAggregate, SubmissionSummary, generate_aggregates};
pub use period::{MAX_YEARS_AHEAD, MAX_YEARS_BACK, SubmissionPeriod, validate_submission_period};
pub use request::{SubmissionRequest, validate_tenant_access};
