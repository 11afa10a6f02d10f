//! Property-based tests for the erstattung crate.
//!
//! Run with: `cargo test --test proptest_tests`

use chrono::{TimeZone, Utc};
use erstattung::core::*;
use erstattung::guard::*;
use erstattung::parser::parse_currency;
use erstattung::rules::check_refundability;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Group the integer part in threes with `sep`.
fn group_thousands(int_part: u64, sep: char) -> String {
    let digits = int_part.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

fn european(cents: u64, grouped: bool) -> String {
    let int_part = cents / 100;
    let int = if grouped {
        group_thousands(int_part, '.')
    } else {
        int_part.to_string()
    };
    format!("€{int},{:02}", cents % 100)
}

fn american(cents: u64, grouped: bool) -> String {
    let int_part = cents / 100;
    let int = if grouped {
        group_thousands(int_part, ',')
    } else {
        int_part.to_string()
    };
    format!("${int}.{:02}", cents % 100)
}

fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    (0..ALL_DOCUMENT_STATUSES.len()).prop_map(|i| ALL_DOCUMENT_STATUSES[i])
}

fn arb_role() -> impl Strategy<Value = Option<UserRole>> {
    prop_oneof![
        Just(None),
        Just(Some(UserRole::Admin)),
        Just(Some(UserRole::User)),
        Just(Some(UserRole::Readonly)),
    ]
}

proptest! {
    /// European notation parses back to the same amount.
    #[test]
    fn european_round_trip(cents in 0u64..100_000_000_000, grouped in any::<bool>()) {
        let text = european(cents, grouped);
        prop_assert_eq!(parse_currency(&text), Some(Decimal::new(cents as i64, 2)), "{}", text);
    }

    /// American notation parses back to the same amount.
    #[test]
    fn american_round_trip(cents in 0u64..100_000_000_000, grouped in any::<bool>()) {
        let text = american(cents, grouped);
        prop_assert_eq!(parse_currency(&text), Some(Decimal::new(cents as i64, 2)), "{}", text);
    }

    /// Arbitrary input never panics.
    #[test]
    fn parse_currency_total(text in ".*") {
        let _ = parse_currency(&text);
    }

    /// Refundable iff a sub-code is assigned, for any description.
    #[test]
    fn refundability_total(text in ".*") {
        let r = check_refundability(&text);
        prop_assert_eq!(r.is_refundable, r.eu_sub_code.is_some());
        prop_assert!(!r.reason.is_empty());
    }

    /// A restricted keyword anywhere overrides refundable keywords.
    #[test]
    fn restricted_keyword_wins(
        prefix in "(hotel|taxi|seminar|consulting) ",
        restricted in "(alcohol|gift|tobacco|casino|wine)",
    ) {
        let r = check_refundability(&format!("{prefix}{restricted} service"));
        prop_assert!(!r.is_refundable);
    }

    /// The allowed list is a subset of the graph successors and agrees
    /// with single-transition validation.
    #[test]
    fn allowed_is_subset_of_successors(
        from in arb_status(),
        role in arb_role(),
        reason in proptest::option::of("[a-z ]{0,12}"),
        hour in 0u32..24,
    ) {
        let at = Utc.with_ymd_and_hms(2025, 11, 4, hour, 0, 0).unwrap().fixed_offset();
        let mut ctx = TransitionContext::new("u", "t", "d", at);
        ctx.reason = reason;
        ctx.metadata.user_role = role;
        ctx.metadata.file_size = Some(1);

        let guard = StatusTransitionGuard::default();
        let allowed = guard.allowed_next_statuses(from, &ctx);
        for to in &allowed {
            prop_assert!(from.successors().contains(to));
            prop_assert!(guard.validate_transition(from, *to, &ctx).is_valid);
        }
        for to in ALL_DOCUMENT_STATUSES {
            if !from.can_transition_to(to) {
                prop_assert!(!guard.validate_transition(from, to, &ctx).is_valid);
            }
        }
    }
}
