use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Document, ExtractedDocument};

/// Role of the user requesting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Readonly,
}

/// Facts about the document and caller that the guard stages read.
///
/// Assembled from the persisted document plus caller overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionMetadata {
    /// Uploaded file size in bytes.
    pub file_size: Option<u64>,
    pub extracted_data: Option<ExtractedDocument>,
    pub vat_number: Option<String>,
    pub invoice_date: Option<String>,
    pub total_amount: Option<Decimal>,
    /// User who confirmed the validation result.
    pub validated_by: Option<String>,
    pub correction_details: Option<String>,
    pub last_transition: Option<DateTime<Utc>>,
    pub processing_started: Option<DateTime<Utc>>,
    pub user_role: Option<UserRole>,
}

impl TransitionMetadata {
    /// Pre-fill from a persisted document: extracted data, invoice date,
    /// parsed total, and `updated_at` as the last transition time.
    pub fn for_document(document: &Document) -> Self {
        let extracted = document.extracted_data.as_ref();
        Self {
            extracted_data: extracted.cloned(),
            invoice_date: extracted.and_then(|e| e.invoice_date.clone()),
            total_amount: extracted.and_then(ExtractedDocument::total),
            last_transition: Some(document.updated_at),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.user_role = Some(role);
        self
    }
}

/// Per-call input to the transition guard. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionContext {
    pub user_id: String,
    /// Empty means missing; the guard rejects it.
    pub tenant_id: String,
    pub document_id: String,
    /// Request time in the caller's local offset.
    pub timestamp: DateTime<FixedOffset>,
    pub reason: Option<String>,
    #[serde(default)]
    pub metadata: TransitionMetadata,
}

impl TransitionContext {
    pub fn new(
        user_id: impl Into<String>,
        tenant_id: impl Into<String>,
        document_id: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            tenant_id: tenant_id.into(),
            document_id: document_id.into(),
            timestamp,
            reason: None,
            metadata: TransitionMetadata::default(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_metadata(mut self, metadata: TransitionMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub(crate) fn has_reason(&self) -> bool {
        self.reason.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}

/// A context where any field may be left out; see
/// [`StatusTransitionGuard::pre_validate_transition`](super::StatusTransitionGuard::pre_validate_transition).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialTransitionContext {
    pub user_id: Option<String>,
    pub tenant_id: Option<String>,
    pub document_id: Option<String>,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub reason: Option<String>,
    pub metadata: Option<TransitionMetadata>,
}

impl PartialTransitionContext {
    /// Fill gaps with `"unknown"` and `now`.
    pub fn complete(self, now: DateTime<FixedOffset>) -> TransitionContext {
        let unknown = || "unknown".to_string();
        TransitionContext {
            user_id: self.user_id.unwrap_or_else(unknown),
            tenant_id: self.tenant_id.unwrap_or_else(unknown),
            document_id: self.document_id.unwrap_or_else(unknown),
            timestamp: self.timestamp.unwrap_or(now),
            reason: self.reason,
            metadata: self.metadata.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ParsedAmount, RawEntity};
    use crate::parser::parse_entities;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn metadata_from_document() {
        let created = Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap();
        let mut doc = Document::uploaded("doc-1", "tenant-a", "user-1", "DE", created);
        doc.attach_extracted(parse_entities(
            &[
                RawEntity::new("invoice_date", "2025-11-01"),
                RawEntity::new("total_amount", "€121,00"),
            ],
            "doc-1",
        ));
        let meta = TransitionMetadata::for_document(&doc);
        assert_eq!(meta.invoice_date.as_deref(), Some("2025-11-01"));
        assert_eq!(meta.total_amount, Some(dec!(121)));
        assert_eq!(meta.last_transition, Some(created));
        assert!(meta.extracted_data.is_some());
        assert!(meta.vat_number.is_none());
    }

    #[test]
    fn unparseable_total_is_absent() {
        let created = Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap();
        let mut doc = Document::uploaded("doc-1", "tenant-a", "user-1", "DE", created);
        doc.extracted_data = Some(ExtractedDocument {
            total_amount: Some(ParsedAmount::Unparseable { raw: "??".into() }),
            ..Default::default()
        });
        assert_eq!(TransitionMetadata::for_document(&doc).total_amount, None);
    }

    #[test]
    fn blank_reason_is_missing() {
        let ts = Utc
            .with_ymd_and_hms(2025, 11, 3, 9, 0, 0)
            .unwrap()
            .fixed_offset();
        let ctx = TransitionContext::new("u", "t", "d", ts);
        assert!(!ctx.has_reason());
        assert!(!ctx.clone().with_reason("   ").has_reason());
        assert!(ctx.with_reason("retry after fix").has_reason());
    }

    #[test]
    fn partial_context_completion() {
        let now = Utc
            .with_ymd_and_hms(2025, 11, 3, 9, 0, 0)
            .unwrap()
            .fixed_offset();
        let ctx = PartialTransitionContext {
            tenant_id: Some("tenant-a".into()),
            ..Default::default()
        }
        .complete(now);
        assert_eq!(ctx.user_id, "unknown");
        assert_eq!(ctx.tenant_id, "tenant-a");
        assert_eq!(ctx.timestamp, now);
    }

    #[test]
    fn metadata_deserializes_camel_case() {
        let meta: TransitionMetadata =
            serde_json::from_str(r#"{"userRole":"readonly","fileSize":2048}"#).unwrap();
        assert_eq!(meta.user_role, Some(UserRole::Readonly));
        assert_eq!(meta.file_size, Some(2048));
    }
}
