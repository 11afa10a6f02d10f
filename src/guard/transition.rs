use chrono::{DateTime, Datelike, FixedOffset, TimeDelta, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::context::{PartialTransitionContext, TransitionContext, UserRole};
use super::policy::GuardPolicy;
use crate::core::DocumentStatus;

/// Outcome of a transition check. Failures are values, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Non-blocking notices; present only on success.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Every missing field when the failure is missing data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_fields: Vec<String>,
}

impl TransitionValidation {
    pub fn allowed() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
            ..Default::default()
        }
    }

    fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Admin-only targets.
const ADMIN_ONLY: [DocumentStatus; 3] = [
    DocumentStatus::SystemError,
    DocumentStatus::Approved,
    DocumentStatus::Rejected,
];

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Validates document status transitions.
///
/// A check runs four stages in order and stops at the first failure:
/// graph validity, business rules, temporal rules, permissions. Warnings
/// from all stages are returned only when every stage passes.
#[derive(Debug, Clone, Default)]
pub struct StatusTransitionGuard {
    policy: GuardPolicy,
}

impl StatusTransitionGuard {
    pub fn new(policy: GuardPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Check whether a document may move from `from` to `to`.
    pub fn validate_transition(
        &self,
        from: DocumentStatus,
        to: DocumentStatus,
        ctx: &TransitionContext,
    ) -> TransitionValidation {
        if !from.can_transition_to(to) {
            return TransitionValidation::rejected(format!(
                "Invalid transition from {from} to {to}. This transition is not allowed."
            ));
        }

        let mut warnings = Vec::new();
        let failure = self
            .check_business_rules(from, to, ctx, &mut warnings)
            .or_else(|| self.check_temporal_rules(from, to, ctx))
            .or_else(|| self.check_permissions(to, ctx));
        if let Some(failure) = failure {
            debug!(
                document_id = %ctx.document_id,
                %from,
                %to,
                error = failure.error_message.as_deref(),
                "transition rejected"
            );
            return failure;
        }

        TransitionValidation::allowed().with_warnings(warnings)
    }

    fn check_business_rules(
        &self,
        from: DocumentStatus,
        to: DocumentStatus,
        ctx: &TransitionContext,
        warnings: &mut Vec<String>,
    ) -> Option<TransitionValidation> {
        let meta = &ctx.metadata;

        if to == DocumentStatus::Processing
            && from == DocumentStatus::Uploaded
            && meta.file_size.unwrap_or(0) == 0
        {
            return Some(TransitionValidation::rejected(
                "Cannot process document: file appears to be empty or corrupted",
            ));
        }

        if to == DocumentStatus::Validating && meta.extracted_data.is_none() {
            return Some(TransitionValidation::rejected(
                "Cannot validate document: no extracted data available",
            ));
        }

        if to == DocumentStatus::ReadyForSubmission {
            let mut missing = Vec::new();
            if is_blank(&meta.vat_number) {
                missing.push("vatNumber".to_string());
            }
            if is_blank(&meta.invoice_date) {
                missing.push("invoiceDate".to_string());
            }
            if meta.total_amount.is_none_or(|t| t.is_zero()) {
                missing.push("totalAmount".to_string());
            }
            if !missing.is_empty() {
                return Some(TransitionValidation {
                    required_fields: missing,
                    ..TransitionValidation::rejected(
                        "Cannot proceed to submission: missing required data",
                    )
                });
            }
            if meta
                .total_amount
                .is_some_and(|t| t < self.policy.min_refund_threshold)
            {
                warnings.push(format!(
                    "Total amount is below minimum refund threshold (€{})",
                    self.policy.min_refund_threshold
                ));
            }
        }

        if to == DocumentStatus::Submitting {
            if is_blank(&meta.validated_by) {
                return Some(TransitionValidation::rejected(
                    "Document must be validated by a user before submission",
                ));
            }
            if !self.policy.is_business_hour(ctx.timestamp.hour()) {
                warnings.push(
                    "Submitting outside business hours - processing may be delayed".to_string(),
                );
            }
        }

        if from.is_error() && !ctx.has_reason() {
            return Some(TransitionValidation::rejected(
                "Error recovery requires a reason for the transition",
            ));
        }

        if to == DocumentStatus::Rejected && !ctx.has_reason() {
            return Some(TransitionValidation::rejected(
                "Rejection requires a detailed reason",
            ));
        }

        if to == DocumentStatus::AddressCorrectionRequested && is_blank(&meta.correction_details) {
            return Some(TransitionValidation::rejected(
                "Address correction requires correction details",
            ));
        }

        None
    }

    fn check_temporal_rules(
        &self,
        from: DocumentStatus,
        to: DocumentStatus,
        ctx: &TransitionContext,
    ) -> Option<TransitionValidation> {
        let now = ctx.timestamp.with_timezone(&Utc);

        if let Some(last) = ctx.metadata.last_transition {
            let since_last = (now - last).num_milliseconds();
            // error states may always be reported immediately
            if since_last < self.policy.debounce_window_ms && !to.is_error() {
                return Some(TransitionValidation::rejected(
                    "Transition rejected: too frequent status changes detected",
                ));
            }
        }

        if to == DocumentStatus::Submitting
            && self.policy.block_weekend_submissions
            && matches!(ctx.timestamp.weekday(), Weekday::Sat | Weekday::Sun)
        {
            return Some(TransitionValidation::rejected(
                "Submissions are not processed on weekends",
            ));
        }

        if from == DocumentStatus::Processing && to != DocumentStatus::ProcessingError {
            if let Some(started) = ctx.metadata.processing_started {
                let limit = TimeDelta::try_seconds(self.policy.processing_timeout_secs);
                if limit.is_some_and(|limit| now - started > limit) {
                    return Some(TransitionValidation::rejected(
                        "Processing timeout exceeded - manual intervention required",
                    ));
                }
            }
        }

        None
    }

    fn check_permissions(
        &self,
        to: DocumentStatus,
        ctx: &TransitionContext,
    ) -> Option<TransitionValidation> {
        let role = ctx.metadata.user_role;

        if ADMIN_ONLY.contains(&to) && role != Some(UserRole::Admin) {
            return Some(TransitionValidation::rejected(format!(
                "Transition to {to} requires administrator privileges"
            )));
        }

        if role == Some(UserRole::Readonly) {
            return Some(TransitionValidation::rejected(
                "Read-only users cannot modify document status",
            ));
        }

        if ctx.tenant_id.trim().is_empty() {
            return Some(TransitionValidation::rejected(
                "Tenant ID required for status transitions",
            ));
        }

        None
    }

    /// Successors of `current` that pass the full validation for `ctx`.
    pub fn allowed_next_statuses(
        &self,
        current: DocumentStatus,
        ctx: &TransitionContext,
    ) -> Vec<DocumentStatus> {
        current
            .successors()
            .iter()
            .copied()
            .filter(|next| self.validate_transition(current, *next, ctx).is_valid)
            .collect()
    }

    /// Validate with a partially known context, filling ids with `"unknown"`
    /// and the timestamp with `now`.
    pub fn pre_validate_transition(
        &self,
        from: DocumentStatus,
        to: DocumentStatus,
        partial: PartialTransitionContext,
        now: DateTime<FixedOffset>,
    ) -> TransitionValidation {
        self.validate_transition(from, to, &partial.complete(now))
    }
}
