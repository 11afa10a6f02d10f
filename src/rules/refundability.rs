//! Keyword rules deciding EU VAT refund eligibility of a line item.
//!
//! Categories are evaluated in a fixed order: the three non-refundable
//! categories first, then the refundable ones by priority, then the general
//! business expense fallback. The first match wins, so a restricted keyword
//! always vetoes a refundable one in the same description.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sub_codes::EuSubCode;
use crate::core::LineItem;

/// Expense category a description is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Alcohol,
    Entertainment,
    Prohibited,
    Transportation,
    Accommodation,
    Fuel,
    Meals,
    Training,
    ProfessionalServices,
    OfficeSupplies,
    GeneralBusiness,
}

/// Evaluation order. `GeneralBusiness` has no keywords and is the fallback.
const EVALUATION_ORDER: [ExpenseCategory; 10] = [
    ExpenseCategory::Alcohol,
    ExpenseCategory::Entertainment,
    ExpenseCategory::Prohibited,
    ExpenseCategory::Transportation,
    ExpenseCategory::Accommodation,
    ExpenseCategory::Fuel,
    ExpenseCategory::Meals,
    ExpenseCategory::Training,
    ExpenseCategory::ProfessionalServices,
    ExpenseCategory::OfficeSupplies,
];

impl ExpenseCategory {
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Alcohol => &[
                "alcohol", "wine", "beer", "spirits", "champagne", "whiskey", "vodka", "rum",
                "alcoholic", "beverages", "minibar",
            ],
            Self::Entertainment => &["entertainment", "gift", "personal", "amusement", "leisure"],
            Self::Prohibited => &["tobacco", "cigarettes", "gambling", "casino"],
            Self::Transportation => &[
                "taxi",
                "uber",
                "bus ticket",
                "train ticket",
                "flight booking",
                "airline ticket",
                "transfers",
                "transfer",
            ],
            Self::Accommodation => &["hotel", "accommodation", "lodging", "motel", "guesthouse"],
            Self::Fuel => &["fuel", "petrol", "gas", "diesel", "gasoline"],
            Self::Meals => &[
                "meal",
                "restaurant",
                "food",
                "dining",
                "catering",
                "lunch",
                "dinner",
                "breakfast",
                "client meal",
                "business lunch",
                "business dinner",
            ],
            Self::Training => &[
                "training",
                "training course",
                "seminar",
                "workshop",
                "course enrollment",
                "education",
                "conference registration",
                "conference fee",
                "course",
                "educational",
            ],
            Self::ProfessionalServices => &[
                "consulting",
                "legal",
                "accounting",
                "professional",
                "advisory",
                "consulting services",
                "legal advice",
                "accounting services",
                "professional advisory",
                "expert consultation",
            ],
            Self::OfficeSupplies => &[
                "office supplies",
                "supplies",
                "stationery",
                "paper",
                "pen",
                "computer",
            ],
            Self::GeneralBusiness => &[],
        }
    }

    /// Sub-code for refundable categories, `None` for restricted ones.
    pub fn eu_sub_code(&self) -> Option<EuSubCode> {
        match self {
            Self::Alcohol | Self::Entertainment | Self::Prohibited => None,
            Self::Transportation => Some(EuSubCode::Transportation),
            Self::Accommodation => Some(EuSubCode::HotelAccommodation),
            Self::Fuel => Some(EuSubCode::BusinessFuel),
            Self::Meals => Some(EuSubCode::RestaurantServices),
            Self::Training => Some(EuSubCode::BusinessTraining),
            Self::ProfessionalServices => Some(EuSubCode::ProfessionalServices),
            Self::OfficeSupplies => Some(EuSubCode::OfficeSupplies),
            Self::GeneralBusiness => Some(EuSubCode::GeneralBusinessServices),
        }
    }

    pub fn is_refundable(&self) -> bool {
        self.eu_sub_code().is_some()
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Alcohol => "Alcohol products are not eligible for VAT refund under EU regulations",
            Self::Entertainment => {
                "Entertainment and gifts are not eligible for VAT refund under EU regulations"
            }
            Self::Prohibited => "Prohibited items (tobacco, gambling) are not eligible for VAT refund",
            Self::Transportation => "Business transportation is refundable",
            Self::Accommodation => "Business accommodation is refundable",
            Self::Fuel => "Business fuel is refundable",
            Self::Meals => "Business meals are refundable",
            Self::Training => "Business training and conferences are refundable",
            Self::ProfessionalServices => "Professional services are refundable",
            Self::OfficeSupplies => "Office supplies are refundable",
            Self::GeneralBusiness => "General business expense - refundable under EU VAT regulations",
        }
    }
}

/// Keyword matcher: phrases match by substring, single words on word boundaries.
struct KeywordSet {
    phrases: Vec<&'static str>,
    words: Option<Regex>,
}

impl KeywordSet {
    fn new(keywords: &[&'static str]) -> Self {
        let (phrases, words): (Vec<&'static str>, Vec<&'static str>) =
            keywords.iter().copied().partition(|k| k.contains(' '));
        let words = (!words.is_empty()).then(|| {
            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            // ASCII word boundaries: "pené" still contains the keyword "pen"
            Regex::new(&format!(r"(?-u:\b)(?:{alternation})(?-u:\b)")).unwrap()
        });
        Self { phrases, words }
    }

    /// `text` must already be lowercase.
    fn matches(&self, text: &str) -> bool {
        self.phrases.iter().any(|p| text.contains(p))
            || self.words.as_ref().is_some_and(|re| re.is_match(text))
    }
}

static MATCHERS: LazyLock<Vec<(ExpenseCategory, KeywordSet)>> = LazyLock::new(|| {
    EVALUATION_ORDER
        .iter()
        .map(|c| (*c, KeywordSet::new(c.keywords())))
        .collect()
});

/// Classify a description into its expense category.
pub fn classify(description: &str) -> ExpenseCategory {
    let text = description.to_lowercase();
    MATCHERS
        .iter()
        .find(|(_, set)| set.matches(&text))
        .map(|(category, _)| *category)
        .unwrap_or(ExpenseCategory::GeneralBusiness)
}

/// Outcome of [`check_refundability`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundabilityResult {
    pub is_refundable: bool,
    /// Set exactly when `is_refundable` is true.
    pub eu_sub_code: Option<EuSubCode>,
    pub reason: String,
    pub category: ExpenseCategory,
}

/// Decide whether a line-item description is refundable. Case-insensitive,
/// total over all strings.
pub fn check_refundability(description: &str) -> RefundabilityResult {
    let category = classify(description);
    debug!(description, ?category, "classified line item");
    RefundabilityResult {
        is_refundable: category.is_refundable(),
        eu_sub_code: category.eu_sub_code(),
        reason: category.reason().to_string(),
        category,
    }
}

/// Fields of a line item the rules read.
#[derive(Debug, Clone, Copy)]
pub struct RefundabilityInput<'a> {
    pub description: &'a str,
    pub vat_amount: Decimal,
    pub net_amount: Decimal,
}

impl<'a> From<&'a LineItem> for RefundabilityInput<'a> {
    fn from(item: &'a LineItem) -> Self {
        Self {
            description: &item.description,
            vat_amount: item.vat_amount,
            net_amount: item.net_amount,
        }
    }
}

/// Refundability fields to store on a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundabilityOutcome {
    pub is_refundable: bool,
    pub refundable_vat_amount: Decimal,
    pub eu_sub_code: Option<EuSubCode>,
    pub validation_notes: String,
}

/// Apply the rules and compute the refundable VAT.
///
/// The refundable amount is the line's VAT amount as-is, sign included: a
/// negative VAT line (credit note) refunds negatively so totals net out.
pub fn apply_refundability_rules(input: RefundabilityInput<'_>) -> RefundabilityOutcome {
    let check = check_refundability(input.description);
    let refundable_vat_amount = if check.is_refundable {
        input.vat_amount
    } else {
        Decimal::ZERO
    };
    debug!(
        description = input.description,
        net_amount = %input.net_amount,
        vat_amount = %input.vat_amount,
        refundable = check.is_refundable,
        refundable_vat_amount = %refundable_vat_amount,
        "applied refundability rules"
    );
    RefundabilityOutcome {
        is_refundable: check.is_refundable,
        refundable_vat_amount,
        eu_sub_code: check.eu_sub_code,
        validation_notes: check.reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn restricted_beats_refundable() {
        let r = check_refundability("hotel restaurant alcohol service");
        assert!(!r.is_refundable);
        assert_eq!(r.eu_sub_code, None);
        assert_eq!(r.category, ExpenseCategory::Alcohol);

        assert_eq!(classify("Hotel minibar"), ExpenseCategory::Alcohol);
        assert_eq!(classify("Business dinner with gift"), ExpenseCategory::Entertainment);
    }

    #[test]
    fn restricted_order() {
        assert_eq!(classify("wine gift casino"), ExpenseCategory::Alcohol);
        assert_eq!(classify("gift casino"), ExpenseCategory::Entertainment);
        assert_eq!(classify("Casino night"), ExpenseCategory::Prohibited);
    }

    #[test]
    fn refundable_priority() {
        // transportation before accommodation
        assert_eq!(classify("Hotel taxi transfer"), ExpenseCategory::Transportation);
        // accommodation before meals
        assert_eq!(classify("Hotel breakfast"), ExpenseCategory::Accommodation);
        assert_eq!(classify("Diesel"), ExpenseCategory::Fuel);
        assert_eq!(classify("Seminar lunch"), ExpenseCategory::Meals);
        assert_eq!(classify("Legal advice"), ExpenseCategory::ProfessionalServices);
    }

    #[test]
    fn word_boundaries() {
        // "pen" must not match inside "expense"
        assert_eq!(classify("Misc expense"), ExpenseCategory::GeneralBusiness);
        assert_eq!(classify("Blue pen"), ExpenseCategory::OfficeSupplies);
        // "gas" not inside "Las Vegas"
        assert_eq!(classify("Vegas"), ExpenseCategory::GeneralBusiness);
        // "rum" not inside "forum"
        assert_eq!(classify("Forum access"), ExpenseCategory::GeneralBusiness);
    }

    #[test]
    fn word_boundaries_are_ascii() {
        // accented letters do not extend a word
        assert_eq!(classify("pené"), ExpenseCategory::OfficeSupplies);
        assert_eq!(classify("hôtel"), ExpenseCategory::GeneralBusiness);
    }

    #[test]
    fn phrases_match_as_substrings() {
        assert_eq!(classify("Train ticket Berlin-Munich"), ExpenseCategory::Transportation);
        assert_eq!(classify("OFFICE SUPPLIES"), ExpenseCategory::OfficeSupplies);
    }

    #[test]
    fn default_is_general_business() {
        let r = check_refundability("Cloud hosting subscription");
        assert!(r.is_refundable);
        assert_eq!(r.eu_sub_code, Some(EuSubCode::GeneralBusinessServices));
        assert!(r.reason.starts_with("General business expense"));
    }

    #[test]
    fn empty_description_is_general() {
        let r = check_refundability("");
        assert!(r.is_refundable);
        assert_eq!(r.eu_sub_code, Some(EuSubCode::GeneralBusinessServices));
    }

    #[test]
    fn refundable_amount_follows_classification() {
        let hotel = apply_refundability_rules(RefundabilityInput {
            description: "Hotel accommodation",
            vat_amount: dec!(84.00),
            net_amount: dec!(400.00),
        });
        assert!(hotel.is_refundable);
        assert_eq!(hotel.refundable_vat_amount, dec!(84.00));
        assert_eq!(hotel.eu_sub_code, Some(EuSubCode::HotelAccommodation));

        let wine = apply_refundability_rules(RefundabilityInput {
            description: "Red wine",
            vat_amount: dec!(5.70),
            net_amount: dec!(30.00),
        });
        assert!(!wine.is_refundable);
        assert_eq!(wine.refundable_vat_amount, Decimal::ZERO);
        assert_eq!(wine.eu_sub_code, None);
    }

    #[test]
    fn negative_vat_refunds_negatively() {
        let credit = apply_refundability_rules(RefundabilityInput {
            description: "Hotel credit note",
            vat_amount: dec!(-12.60),
            net_amount: dec!(-60.00),
        });
        assert_eq!(credit.refundable_vat_amount, dec!(-12.60));
    }
}
