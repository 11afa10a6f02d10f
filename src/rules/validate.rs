use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::refundability::{RefundabilityInput, RefundabilityOutcome, apply_refundability_rules};
use crate::core::{Document, DocumentStatus, LineItem};

impl LineItem {
    /// Classify this line item and store the outcome on it.
    pub fn apply_refundability(&mut self) -> RefundabilityOutcome {
        let outcome = apply_refundability_rules(RefundabilityInput::from(&*self));
        self.is_refundable = Some(outcome.is_refundable);
        self.refundable_vat_amount = Some(outcome.refundable_vat_amount);
        self.eu_sub_code = outcome.eu_sub_code;
        self.validation_notes = Some(outcome.validation_notes.clone());
        outcome
    }
}

const TOTAL_OVERFLOW: &str = "Refundable VAT total exceeds the supported range";

/// Result of validating a document's line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentValidation {
    /// Status the document should move to.
    pub status: DocumentStatus,
    pub line_items: Vec<LineItem>,
    pub total_refundable_vat_amount: Decimal,
    pub validation_error: Option<String>,
}

impl DocumentValidation {
    pub fn refundable_count(&self) -> usize {
        self.line_items
            .iter()
            .filter(|i| i.is_refundable == Some(true))
            .count()
    }
}

/// Classify every line item and decide the resulting status.
///
/// No line items, or a refundable total too large to represent, is a
/// validation error. Otherwise the document is ready for
/// submission when at least one item is refundable, and has no refundable
/// items otherwise.
pub fn validate_line_items(line_items: &[LineItem]) -> DocumentValidation {
    if line_items.is_empty() {
        warn!("no line items found for validation");
        return DocumentValidation {
            status: DocumentStatus::ValidationError,
            line_items: Vec::new(),
            total_refundable_vat_amount: Decimal::ZERO,
            validation_error: Some("No line items found".into()),
        };
    }

    let mut items = line_items.to_vec();
    let total = items
        .iter_mut()
        .map(|item| item.apply_refundability().refundable_vat_amount)
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount));

    let Some(total) = total else {
        warn!(line_items = items.len(), "refundable VAT total overflowed");
        return DocumentValidation {
            status: DocumentStatus::ValidationError,
            line_items: items,
            total_refundable_vat_amount: Decimal::ZERO,
            validation_error: Some(TOTAL_OVERFLOW.into()),
        };
    };

    let any_refundable = items.iter().any(|i| i.is_refundable == Some(true));
    let (status, validation_error) = if any_refundable {
        (DocumentStatus::ReadyForSubmission, None)
    } else {
        (
            DocumentStatus::NoRefundableItems,
            Some("No refundable items found".to_string()),
        )
    };

    let validation = DocumentValidation {
        status,
        line_items: items,
        total_refundable_vat_amount: total,
        validation_error,
    };
    info!(
        status = %validation.status,
        line_items = validation.line_items.len(),
        refundable = validation.refundable_count(),
        total_refundable_vat = %validation.total_refundable_vat_amount,
        "validated line items"
    );
    validation
}

impl Document {
    /// Write a validation outcome back onto the document.
    pub fn apply_validation(&mut self, validation: DocumentValidation) {
        self.status = validation.status;
        self.line_items = validation.line_items;
        self.total_refundable_vat_amount = Some(validation.total_refundable_vat_amount);
        self.validation_error = validation.validation_error;
    }
}
