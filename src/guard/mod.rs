//! Document status transition guard.
//!
//! Transitions are checked against the fixed status graph, then against
//! business, temporal and permission rules. Rejections come back as a
//! [`TransitionValidation`] carrying the message to show the user; warnings
//! never block.
//!
//! Callers must serialize transition attempts per document: the debounce
//! rule compares against `last_transition`, which two concurrent requests
//! could both read stale.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use erstattung::core::DocumentStatus;
//! use erstattung::guard::*;
//!
//! let guard = StatusTransitionGuard::default();
//! let at = Utc.with_ymd_and_hms(2025, 11, 4, 10, 0, 0).unwrap().fixed_offset();
//! let ctx = TransitionContext::new("user-1", "tenant-a", "doc-1", at)
//!     .with_metadata(TransitionMetadata::default().with_role(UserRole::User));
//!
//! let result = guard.validate_transition(DocumentStatus::Submitted, DocumentStatus::Approved, &ctx);
//! assert!(!result.is_valid);
//! assert!(result.error_message.unwrap().contains("administrator privileges"));
//! ```

mod audit;
mod context;
mod policy;
mod transition;

pub use audit::{TransitionEvent, TransitionEventType, log_transition};
pub use context::{PartialTransitionContext, TransitionContext, TransitionMetadata, UserRole};
pub use policy::{DEBOUNCE_WINDOW_MS, GuardPolicy, MIN_REFUND_THRESHOLD, PROCESSING_TIMEOUT_SECS};
pub use transition::{StatusTransitionGuard, TransitionValidation};
