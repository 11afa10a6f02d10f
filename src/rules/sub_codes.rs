use std::fmt;

use serde::{Deserialize, Serialize};

/// EU sub-code of a refundable business expense category.
///
/// Serialized as the dotted code, e.g. `"55.10.10"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EuSubCode {
    #[serde(rename = "55.10.10")]
    HotelAccommodation,
    #[serde(rename = "56.10.11")]
    RestaurantServices,
    #[serde(rename = "47.30.20")]
    BusinessFuel,
    #[serde(rename = "85.59.12")]
    BusinessTraining,
    #[serde(rename = "77.11.00")]
    GeneralBusinessServices,
    #[serde(rename = "82.30.00")]
    ConferenceServices,
    #[serde(rename = "49.39.00")]
    Transportation,
    #[serde(rename = "47.76.20")]
    OfficeSupplies,
    #[serde(rename = "69.20.30")]
    ProfessionalServices,
}

/// Every sub-code the engine can assign.
pub const ALL_EU_SUB_CODES: [EuSubCode; 9] = [
    EuSubCode::HotelAccommodation,
    EuSubCode::RestaurantServices,
    EuSubCode::BusinessFuel,
    EuSubCode::BusinessTraining,
    EuSubCode::GeneralBusinessServices,
    EuSubCode::ConferenceServices,
    EuSubCode::Transportation,
    EuSubCode::OfficeSupplies,
    EuSubCode::ProfessionalServices,
];

impl EuSubCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::HotelAccommodation => "55.10.10",
            Self::RestaurantServices => "56.10.11",
            Self::BusinessFuel => "47.30.20",
            Self::BusinessTraining => "85.59.12",
            Self::GeneralBusinessServices => "77.11.00",
            Self::ConferenceServices => "82.30.00",
            Self::Transportation => "49.39.00",
            Self::OfficeSupplies => "47.76.20",
            Self::ProfessionalServices => "69.20.30",
        }
    }

    /// Parse from the dotted code string.
    pub fn from_code(code: &str) -> Option<Self> {
        ALL_EU_SUB_CODES.into_iter().find(|c| c.code() == code)
    }

    /// Upper snake-case category name, e.g. `"HOTEL_ACCOMMODATION"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HotelAccommodation => "HOTEL_ACCOMMODATION",
            Self::RestaurantServices => "RESTAURANT_SERVICES",
            Self::BusinessFuel => "BUSINESS_FUEL",
            Self::BusinessTraining => "BUSINESS_TRAINING",
            Self::GeneralBusinessServices => "GENERAL_BUSINESS_SERVICES",
            Self::ConferenceServices => "CONFERENCE_SERVICES",
            Self::Transportation => "TRANSPORTATION",
            Self::OfficeSupplies => "OFFICE_SUPPLIES",
            Self::ProfessionalServices => "PROFESSIONAL_SERVICES",
        }
    }
}

impl fmt::Display for EuSubCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// All sub-codes as `(name, code)` pairs.
pub fn available_eu_sub_codes() -> Vec<(&'static str, &'static str)> {
    ALL_EU_SUB_CODES.iter().map(|c| (c.name(), c.code())).collect()
}

pub fn is_valid_eu_sub_code(code: &str) -> bool {
    EuSubCode::from_code(code).is_some()
}
