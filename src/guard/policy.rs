use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Totals below this trigger a low-amount warning before submission (EUR).
pub const MIN_REFUND_THRESHOLD: Decimal = dec!(25);

/// Two transitions of one document closer than this are rejected.
pub const DEBOUNCE_WINDOW_MS: i64 = 1_000;

/// Processing that ran longer than this needs an explicit error transition.
pub const PROCESSING_TIMEOUT_SECS: i64 = 10 * 60;

/// Tunable limits applied by the transition guard.
///
/// Every field has a default, so a partial configuration deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardPolicy {
    pub min_refund_threshold: Decimal,
    pub debounce_window_ms: i64,
    pub processing_timeout_secs: i64,
    /// First business hour (inclusive).
    pub business_hours_start: u32,
    /// Last business hour (inclusive).
    pub business_hours_end: u32,
    pub block_weekend_submissions: bool,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            min_refund_threshold: MIN_REFUND_THRESHOLD,
            debounce_window_ms: DEBOUNCE_WINDOW_MS,
            processing_timeout_secs: PROCESSING_TIMEOUT_SECS,
            business_hours_start: 8,
            business_hours_end: 18,
            block_weekend_submissions: true,
        }
    }
}

impl GuardPolicy {
    pub fn is_business_hour(&self, hour: u32) -> bool {
        (self.business_hours_start..=self.business_hours_end).contains(&hour)
    }
}
