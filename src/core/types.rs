use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currencies;
use super::status::DocumentStatus;
use crate::rules::EuSubCode;

/// One recognized field or line-item span from the document-recognition service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    /// Entity type, e.g. `"invoice_id"` or `"line_item"`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Recognized text.
    #[serde(alias = "mentionText", default)]
    pub text: String,
}

impl RawEntity {
    pub fn new(entity_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            text: text.into(),
        }
    }
}

/// Full response of the recognition service.
///
/// `entities: None` (no list at all) is a structural failure; an empty list
/// yields an empty but valid document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognitionResponse {
    #[serde(default)]
    pub entities: Option<Vec<RawEntity>>,
}

/// A header amount as read from the recognition output.
///
/// Unparseable text is kept, not dropped: callers must check
/// [`ParsedAmount::value`] before using it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsedAmount {
    Value(Decimal),
    Unparseable { raw: String },
}

impl ParsedAmount {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unparseable { .. } => None,
        }
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::Unparseable { .. })
    }
}

/// A single invoice line with its refundability classification.
///
/// Created unclassified by the parser; the four refundability fields are
/// filled exactly once by [`LineItem::apply_refundability`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub original_text: String,
    pub description: String,
    pub net_amount: Decimal,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub total_amount: Decimal,
    pub is_refundable: Option<bool>,
    /// `vat_amount` when refundable, zero otherwise.
    pub refundable_vat_amount: Option<Decimal>,
    pub eu_sub_code: Option<EuSubCode>,
    pub validation_notes: Option<String>,
}

impl LineItem {
    /// Whether the refundability rules have been applied.
    pub fn is_classified(&self) -> bool {
        self.is_refundable.is_some()
    }

    /// Counts toward a submission: refundable, coded, and a positive amount.
    pub fn is_submittable(&self) -> bool {
        self.is_refundable == Some(true)
            && self.eu_sub_code.is_some()
            && self.refundable_vat_amount.is_some_and(|a| a > Decimal::ZERO)
    }
}

/// Structured data extracted from one recognition response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub invoice_id: Option<String>,
    pub invoice_date: Option<String>,
    pub supplier_name: Option<String>,
    pub currency: Option<String>,
    pub total_amount: Option<ParsedAmount>,
    pub net_amount: Option<ParsedAmount>,
    pub vat_amount: Option<ParsedAmount>,
    pub line_items: Vec<LineItem>,
    /// Entity types without a dedicated field, last write wins.
    pub other_fields: BTreeMap<String, String>,
}

impl ExtractedDocument {
    /// ISO 4217 code for the header currency, given either as a code or a symbol.
    pub fn currency_code(&self) -> Option<&'static str> {
        let raw = self.currency.as_deref()?.trim();
        let mut chars = raw.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return currencies::currency_for_symbol(c);
        }
        currencies::known_currency_code(&raw.to_ascii_uppercase())
    }

    /// Total amount when it was present and parseable.
    pub fn total(&self) -> Option<Decimal> {
        self.total_amount.as_ref().and_then(ParsedAmount::value)
    }
}

/// A persisted refund document. Owned by the persistence layer; the engine
/// only reads it and writes status and line-item classification back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub tenant_id: String,
    pub uploaded_by: String,
    pub status: DocumentStatus,
    /// Country the refund is claimed from (ISO 3166-1 alpha-2).
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub extracted_data: Option<ExtractedDocument>,
    pub line_items: Vec<LineItem>,
    pub total_refundable_vat_amount: Option<Decimal>,
    pub validation_error: Option<String>,
}

impl Document {
    /// A freshly uploaded document with no extracted data.
    pub fn uploaded(
        id: impl Into<String>,
        tenant_id: impl Into<String>,
        uploaded_by: impl Into<String>,
        country: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            tenant_id: tenant_id.into(),
            uploaded_by: uploaded_by.into(),
            status: DocumentStatus::Uploaded,
            country: country.into(),
            created_at,
            updated_at: created_at,
            extracted_data: None,
            line_items: Vec::new(),
            total_refundable_vat_amount: None,
            validation_error: None,
        }
    }

    /// Attach parser output; line items are copied to the top level where the
    /// validation step reads them.
    pub fn attach_extracted(&mut self, extracted: ExtractedDocument) {
        self.line_items = extracted.line_items.clone();
        self.extracted_data = Some(extracted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn doc_with_currency(c: &str) -> ExtractedDocument {
        ExtractedDocument {
            currency: Some(c.into()),
            ..Default::default()
        }
    }

    #[test]
    fn currency_code_from_symbol_or_code() {
        assert_eq!(doc_with_currency("€").currency_code(), Some("EUR"));
        assert_eq!(doc_with_currency("eur").currency_code(), Some("EUR"));
        assert_eq!(doc_with_currency(" GBP ").currency_code(), Some("GBP"));
        assert_eq!(doc_with_currency("Euro").currency_code(), None);
        assert_eq!(ExtractedDocument::default().currency_code(), None);
    }

    #[test]
    fn parsed_amount_accessors() {
        let ok = ParsedAmount::Value(dec!(12.50));
        let bad = ParsedAmount::Unparseable { raw: "n/a".into() };
        assert_eq!(ok.value(), Some(dec!(12.50)));
        assert!(bad.is_unparseable());
        assert_eq!(bad.value(), None);
    }

    #[test]
    fn raw_entity_accepts_mention_text() {
        let e: RawEntity =
            serde_json::from_str(r#"{"type":"invoice_id","mentionText":"INV-1"}"#).unwrap();
        assert_eq!(e, RawEntity::new("invoice_id", "INV-1"));
    }

    #[test]
    fn line_item_serializes_camel_case() {
        let item = LineItem {
            original_text: "Taxi €10.00".into(),
            description: "Taxi €10.00".into(),
            net_amount: dec!(10.00),
            vat_rate: dec!(0),
            vat_amount: dec!(0),
            total_amount: dec!(0),
            is_refundable: None,
            refundable_vat_amount: None,
            eu_sub_code: None,
            validation_notes: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("refundableVatAmount").is_some());
        assert!(json.get("isRefundable").unwrap().is_null());
    }
}
