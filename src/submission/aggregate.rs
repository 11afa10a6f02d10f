use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::period::SubmissionPeriod;
use super::request::SubmissionRequest;
use crate::core::{Document, DocumentStatus, ErstattungError};
use crate::rules::EuSubCode;

/// Totals of every submittable line item sharing one EU sub-code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EuSubCodeAggregate {
    pub sub_code: EuSubCode,
    pub total_net_amount: Decimal,
    pub total_vat_amount: Decimal,
    pub total_refundable_vat_amount: Decimal,
    /// Number of line items folded in; one receipt may add several.
    pub document_count: usize,
}

impl EuSubCodeAggregate {
    fn empty(sub_code: EuSubCode) -> Self {
        Self {
            sub_code,
            total_net_amount: Decimal::ZERO,
            total_vat_amount: Decimal::ZERO,
            total_refundable_vat_amount: Decimal::ZERO,
            document_count: 0,
        }
    }

    /// Fold one line item in. `None` when a sum overflows.
    fn add(&mut self, net: Decimal, vat: Decimal, refundable: Decimal) -> Option<()> {
        self.total_net_amount = self.total_net_amount.checked_add(net)?;
        self.total_vat_amount = self.total_vat_amount.checked_add(vat)?;
        self.total_refundable_vat_amount =
            self.total_refundable_vat_amount.checked_add(refundable)?;
        self.document_count += 1;
        Some(())
    }
}

/// Aggregated refund claim for one tenant, country and quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub period: SubmissionPeriod,
    pub tenant_id: String,
    pub country_code: String,
    /// Sorted by sub-code.
    pub aggregates: Vec<EuSubCodeAggregate>,
    pub total_refund_amount: Decimal,
    /// Documents in the period, in input order.
    pub document_ids: Vec<String>,
}

impl SubmissionSummary {
    pub fn document_count(&self) -> usize {
        self.document_ids.len()
    }
}

/// Fold the ready documents of `request` into per-sub-code totals.
///
/// Only documents with status `ready_for_submission`, the requested country
/// and tenant are considered, then those created inside the period. Line
/// items count when they are refundable, carry a sub-code and a positive
/// refundable amount.
///
/// # Errors
///
/// [`ErstattungError::NoReadyDocuments`] when nothing is ready,
/// [`ErstattungError::NoDocumentsInPeriod`] when nothing ready falls in the
/// period, [`ErstattungError::NoRefundableAmount`] when the total is zero,
/// [`ErstattungError::AmountOverflow`] when a sum leaves the `Decimal` range.
pub fn generate_aggregates(
    documents: &[Document],
    request: &SubmissionRequest,
) -> Result<SubmissionSummary, ErstattungError> {
    let ready: Vec<&Document> = documents
        .iter()
        .filter(|d| {
            d.status == DocumentStatus::ReadyForSubmission
                && d.country == request.country_code
                && d.tenant_id == request.tenant_id
        })
        .collect();
    if ready.is_empty() {
        return Err(ErstattungError::NoReadyDocuments {
            period: request.period.to_string(),
            country: request.country_code.clone(),
        });
    }

    let in_period: Vec<&Document> = ready
        .into_iter()
        .filter(|d| request.period.contains(d.created_at.date_naive()))
        .collect();
    if in_period.is_empty() {
        return Err(ErstattungError::NoDocumentsInPeriod(request.period.to_string()));
    }

    let overflow = || ErstattungError::AmountOverflow(request.period.to_string());
    let mut by_code: BTreeMap<&'static str, EuSubCodeAggregate> = BTreeMap::new();
    let mut total = Decimal::ZERO;
    for doc in &in_period {
        let mut positions = 0usize;
        for item in doc.line_items.iter().filter(|i| i.is_submittable()) {
            let (Some(code), Some(refundable)) = (item.eu_sub_code, item.refundable_vat_amount)
            else {
                continue;
            };
            let agg = by_code
                .entry(code.code())
                .or_insert_with(|| EuSubCodeAggregate::empty(code));
            agg.add(item.net_amount, item.vat_amount, refundable).ok_or_else(overflow)?;
            total = total.checked_add(refundable).ok_or_else(overflow)?;
            positions += 1;
        }
        debug!(document_id = %doc.id, positions, "document aggregated");
    }

    if total.is_zero() {
        return Err(ErstattungError::NoRefundableAmount);
    }

    let summary = SubmissionSummary {
        period: request.period,
        tenant_id: request.tenant_id.clone(),
        country_code: request.country_code.clone(),
        aggregates: by_code.into_values().collect(),
        total_refund_amount: total,
        document_ids: in_period.iter().map(|d| d.id.clone()).collect(),
    };
    info!(
        period = %summary.period,
        country = %summary.country_code,
        tenant_id = %summary.tenant_id,
        documents = summary.document_count(),
        positions = summary.aggregates.len(),
        total = %summary.total_refund_amount,
        "submission aggregated"
    );
    Ok(summary)
}
