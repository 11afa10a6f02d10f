use serde::{Deserialize, Serialize};

use super::period::SubmissionPeriod;
use crate::core::ErstattungError;
use crate::core::countries::is_submission_country;

/// What to aggregate: one tenant, one country, one quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(rename = "submissionPeriod")]
    pub period: SubmissionPeriod,
    pub country_code: String,
    pub tenant_id: String,
}

impl SubmissionRequest {
    /// Build a request for the authenticated user's tenant.
    ///
    /// `requested_tenant` is the tenant named in the call, if any; it must
    /// match `user_tenant`.
    pub fn new(
        period: SubmissionPeriod,
        country_code: &str,
        requested_tenant: Option<&str>,
        user_tenant: &str,
    ) -> Result<Self, ErstattungError> {
        let country_code = country_code.trim().to_ascii_uppercase();
        if !is_submission_country(&country_code) {
            return Err(ErstattungError::InvalidCountry(country_code));
        }
        validate_tenant_access(requested_tenant, user_tenant)?;
        Ok(Self {
            period,
            country_code,
            tenant_id: user_tenant.to_string(),
        })
    }
}

/// A caller may only name its own tenant. Naming none means its own.
pub fn validate_tenant_access(
    requested: Option<&str>,
    user_tenant: &str,
) -> Result<(), ErstattungError> {
    match requested {
        Some(t) if !t.is_empty() && t != user_tenant => Err(ErstattungError::TenantAccess),
        _ => Ok(()),
    }
}
