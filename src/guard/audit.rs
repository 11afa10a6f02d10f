//! Audit trail of transition attempts, emitted on the `erstattung::audit`
//! tracing target.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::context::TransitionContext;
use super::transition::TransitionValidation;
use crate::core::DocumentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEventType {
    TransitionAttempted,
    TransitionBlocked,
    TransitionCompleted,
    TransitionWarning,
}

impl TransitionEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransitionAttempted => "transition_attempted",
            Self::TransitionBlocked => "transition_blocked",
            Self::TransitionCompleted => "transition_completed",
            Self::TransitionWarning => "transition_warning",
        }
    }
}

/// One audited transition attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEvent {
    #[serde(rename = "type")]
    pub event_type: TransitionEventType,
    pub document_id: String,
    pub from: DocumentStatus,
    pub to: DocumentStatus,
    pub user_id: String,
    pub tenant_id: String,
    pub timestamp: DateTime<FixedOffset>,
    pub reason: Option<String>,
    pub error_message: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl TransitionEvent {
    /// Event for a transition that is about to be checked.
    pub fn attempted(from: DocumentStatus, to: DocumentStatus, ctx: &TransitionContext) -> Self {
        Self {
            event_type: TransitionEventType::TransitionAttempted,
            document_id: ctx.document_id.clone(),
            from,
            to,
            user_id: ctx.user_id.clone(),
            tenant_id: ctx.tenant_id.clone(),
            timestamp: ctx.timestamp,
            reason: ctx.reason.clone(),
            error_message: None,
            warnings: Vec::new(),
        }
    }

    /// Event describing a finished check: blocked, completed with warnings,
    /// or completed.
    pub fn from_validation(
        from: DocumentStatus,
        to: DocumentStatus,
        ctx: &TransitionContext,
        validation: &TransitionValidation,
    ) -> Self {
        let event_type = if !validation.is_valid {
            TransitionEventType::TransitionBlocked
        } else if !validation.warnings.is_empty() {
            TransitionEventType::TransitionWarning
        } else {
            TransitionEventType::TransitionCompleted
        };
        Self {
            event_type,
            error_message: validation.error_message.clone(),
            warnings: validation.warnings.clone(),
            ..Self::attempted(from, to, ctx)
        }
    }
}

/// Emit an audit record for `event`.
pub fn log_transition(event: &TransitionEvent) {
    match event.event_type {
        TransitionEventType::TransitionBlocked => warn!(
            target: "erstattung::audit",
            event = event.event_type.as_str(),
            document_id = %event.document_id,
            from = %event.from,
            to = %event.to,
            user_id = %event.user_id,
            tenant_id = %event.tenant_id,
            error = event.error_message.as_deref(),
            "transition blocked"
        ),
        TransitionEventType::TransitionWarning => warn!(
            target: "erstattung::audit",
            event = event.event_type.as_str(),
            document_id = %event.document_id,
            from = %event.from,
            to = %event.to,
            user_id = %event.user_id,
            tenant_id = %event.tenant_id,
            warnings = %event.warnings.join(", "),
            "transition completed with warnings"
        ),
        TransitionEventType::TransitionAttempted | TransitionEventType::TransitionCompleted => {
            info!(
                target: "erstattung::audit",
                event = event.event_type.as_str(),
                document_id = %event.document_id,
                from = %event.from,
                to = %event.to,
                user_id = %event.user_id,
                tenant_id = %event.tenant_id,
                reason = event.reason.as_deref(),
                "status transition"
            )
        }
    }
}
