//! Document lifecycle states and the fixed transition graph.
//!
//! Every status is described by exactly one row of [`STATUS_TABLE`]: its
//! category, its successors, and the labels shown to users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an uploaded refund document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    DocumentAiSuccess,
    DocumentAiError,
    AwaitingValidation,
    Validating,
    Validated,
    ValidationError,
    ReadyForSubmission,
    NoRefundableItems,
    Submitting,
    Submitted,
    SubmissionError,
    AddressCorrectionRequested,
    AddressCorrected,
    Approved,
    Rejected,
    Completed,
    ProcessingError,
    SystemError,
}

/// Coarse grouping used by the guard to tell error recovery from normal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Processing,
    Validation,
    Submission,
    Correction,
    Final,
    Error,
}

impl StatusCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Validation => "validation",
            Self::Submission => "submission",
            Self::Correction => "correction",
            Self::Final => "final",
            Self::Error => "error",
        }
    }
}

/// One row of the status table.
#[derive(Debug)]
pub struct StatusInfo {
    pub status: DocumentStatus,
    pub code: &'static str,
    pub category: StatusCategory,
    pub successors: &'static [DocumentStatus],
    pub label: &'static str,
    pub description: &'static str,
}

use DocumentStatus as S;
use StatusCategory as C;

/// The status table, indexed by `DocumentStatus as usize`.
pub static STATUS_TABLE: [StatusInfo; 20] = [
    StatusInfo {
        status: S::Uploaded,
        code: "uploaded",
        category: C::Processing,
        successors: &[S::Processing, S::ProcessingError],
        label: "Uploaded",
        description: "Document has been uploaded and is queued for processing",
    },
    StatusInfo {
        status: S::Processing,
        code: "processing",
        category: C::Processing,
        successors: &[S::DocumentAiSuccess, S::DocumentAiError, S::ProcessingError],
        label: "Processing...",
        description: "Document is being processed by the system",
    },
    StatusInfo {
        status: S::DocumentAiSuccess,
        code: "document_ai_success",
        category: C::Processing,
        successors: &[S::AwaitingValidation, S::Validating],
        label: "Document AI Success",
        description: "Document has been successfully processed by Document AI",
    },
    StatusInfo {
        status: S::DocumentAiError,
        code: "document_ai_error",
        category: C::Error,
        successors: &[S::Processing, S::SystemError],
        label: "Document AI Error",
        description: "Document AI processing failed",
    },
    StatusInfo {
        status: S::AwaitingValidation,
        code: "awaiting_validation",
        category: C::Validation,
        successors: &[S::Validating],
        label: "Awaiting Validation",
        description: "Document is waiting to be validated",
    },
    StatusInfo {
        status: S::Validating,
        code: "validating",
        category: C::Validation,
        successors: &[S::Validated, S::ValidationError],
        label: "Validating...",
        description: "Document data is being validated for EU VAT compliance",
    },
    StatusInfo {
        status: S::Validated,
        code: "validated",
        category: C::Validation,
        successors: &[S::ReadyForSubmission, S::NoRefundableItems],
        label: "Validated",
        description: "Document has passed validation checks",
    },
    StatusInfo {
        status: S::ValidationError,
        code: "validation_error",
        category: C::Error,
        successors: &[S::AddressCorrectionRequested, S::Validating, S::SystemError],
        label: "Validation Error",
        description: "Document failed validation - manual review required",
    },
    StatusInfo {
        status: S::ReadyForSubmission,
        code: "ready_for_submission",
        category: C::Submission,
        successors: &[S::Submitting],
        label: "Ready for Submission",
        description: "Document is ready to be submitted to tax authorities",
    },
    StatusInfo {
        status: S::NoRefundableItems,
        code: "no_refundable_items",
        category: C::Final,
        successors: &[S::Completed],
        label: "No Refundable Items",
        description: "No VAT-refundable items found in this document",
    },
    StatusInfo {
        status: S::Submitting,
        code: "submitting",
        category: C::Submission,
        successors: &[S::Submitted, S::SubmissionError],
        label: "Submitting...",
        description: "Document is being submitted to tax authorities",
    },
    StatusInfo {
        status: S::Submitted,
        code: "submitted",
        category: C::Submission,
        successors: &[S::Approved, S::Rejected],
        label: "Submitted",
        description: "Document has been submitted and is awaiting approval",
    },
    StatusInfo {
        status: S::SubmissionError,
        code: "submission_error",
        category: C::Error,
        successors: &[S::Submitting, S::SystemError],
        label: "Submission Error",
        description: "Submission to tax authorities failed",
    },
    StatusInfo {
        status: S::AddressCorrectionRequested,
        code: "address_correction_requested",
        category: C::Correction,
        successors: &[S::AddressCorrected, S::ValidationError],
        label: "Address Correction Requested",
        description: "Address correction has been requested from supplier",
    },
    StatusInfo {
        status: S::AddressCorrected,
        code: "address_corrected",
        category: C::Correction,
        successors: &[S::Validating],
        label: "Address Corrected",
        description: "Supplier has provided address correction",
    },
    StatusInfo {
        status: S::Approved,
        code: "approved",
        category: C::Final,
        successors: &[S::Completed],
        label: "Approved",
        description: "VAT refund has been approved by tax authorities",
    },
    StatusInfo {
        status: S::Rejected,
        code: "rejected",
        category: C::Final,
        successors: &[S::Completed],
        label: "Rejected",
        description: "VAT refund has been rejected by tax authorities",
    },
    StatusInfo {
        status: S::Completed,
        code: "completed",
        category: C::Final,
        successors: &[],
        label: "Completed",
        description: "Processing is complete",
    },
    StatusInfo {
        status: S::ProcessingError,
        code: "processing_error",
        category: C::Error,
        successors: &[S::Processing, S::SystemError],
        label: "Processing Error",
        description: "An error occurred during document processing",
    },
    StatusInfo {
        status: S::SystemError,
        code: "system_error",
        category: C::Error,
        successors: &[],
        label: "System Error",
        description: "A system error occurred - contact support",
    },
];

/// Every status, in declaration order.
pub const ALL_DOCUMENT_STATUSES: [DocumentStatus; 20] = [
    S::Uploaded,
    S::Processing,
    S::DocumentAiSuccess,
    S::DocumentAiError,
    S::AwaitingValidation,
    S::Validating,
    S::Validated,
    S::ValidationError,
    S::ReadyForSubmission,
    S::NoRefundableItems,
    S::Submitting,
    S::Submitted,
    S::SubmissionError,
    S::AddressCorrectionRequested,
    S::AddressCorrected,
    S::Approved,
    S::Rejected,
    S::Completed,
    S::ProcessingError,
    S::SystemError,
];

impl DocumentStatus {
    /// The table row describing this status.
    pub fn info(&self) -> &'static StatusInfo {
        &STATUS_TABLE[*self as usize]
    }

    /// Wire representation, e.g. `"ready_for_submission"`.
    pub fn as_str(&self) -> &'static str {
        self.info().code
    }

    pub fn category(&self) -> StatusCategory {
        self.info().category
    }

    /// Declared successors in the transition graph.
    pub fn successors(&self) -> &'static [DocumentStatus] {
        self.info().successors
    }

    /// Whether `to` is a declared successor of `self`.
    pub fn can_transition_to(&self, to: DocumentStatus) -> bool {
        self.successors().contains(&to)
    }

    /// No outgoing edges.
    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.category() == StatusCategory::Error
    }

    /// Statuses during which work is actively running.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, S::Processing | S::Validating | S::Submitting)
    }

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        self.info().label
    }

    pub fn description(&self) -> &'static str {
        self.info().description
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown document status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for DocumentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STATUS_TABLE
            .iter()
            .find(|row| row.code == s)
            .map(|row| row.status)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
