use thiserror::Error;

/// Structural failures the caller cannot proceed past.
///
/// Field-level parse problems never surface here (they stay as `None` or
/// [`ParsedAmount::Unparseable`](super::ParsedAmount)), and guard rejections are
/// reported through [`TransitionValidation`](crate::guard::TransitionValidation).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErstattungError {
    /// The recognition response carried no entity list at all.
    #[error("No entities found in Document AI response")]
    NoEntities,

    /// The recognition response could not be decoded.
    #[error("malformed recognition response: {0}")]
    MalformedResponse(String),

    /// A submission period string did not match `Q[1-4]/YYYY` or `YYYY-Q[1-4]`,
    /// or lies outside the accepted year window.
    #[error("invalid submission period: {0}")]
    InvalidPeriod(String),

    /// Country code not accepted for refund submissions.
    #[error("invalid country code '{0}': must be one of DE, FR, AT")]
    InvalidCountry(String),

    /// Caller tried to reach another tenant's documents.
    #[error("Access denied: Cannot access other tenant's data")]
    TenantAccess,

    /// No document is ready for submission for the requested country.
    #[error("No ready-for-submission documents found for period {period} and country {country}")]
    NoReadyDocuments { period: String, country: String },

    /// Ready documents exist, but none falls inside the period.
    #[error("No documents found for the specified period {0}")]
    NoDocumentsInPeriod(String),

    /// The matching documents carry no refundable VAT.
    #[error("No refundable VAT amounts found in the selected documents")]
    NoRefundableAmount,

    /// Summing the refund amounts left the `Decimal` range.
    #[error("Refund amounts for {0} exceed the supported range")]
    AmountOverflow(String),

    /// XML rendering exists for one country only.
    #[error(
        "XML generation for country {0} is not yet implemented. Currently only DE (Germany) is supported."
    )]
    UnsupportedCountry(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

impl ErstattungError {
    /// True for errors caused by the request itself rather than the data.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPeriod(_) | Self::InvalidCountry(_) | Self::TenantAccess
        )
    }
}
