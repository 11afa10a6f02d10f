//! UStVEU rendering. Run with: `cargo test --features xml --test xml_tests`

#![cfg(feature = "xml")]

use chrono::{DateTime, TimeZone, Utc};
use erstattung::core::*;
use erstattung::rules::EuSubCode;
use erstattung::submission::xml::to_ustveu_xml;
use erstattung::submission::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(code: EuSubCode, net: Decimal, vat: Decimal, refundable: bool) -> LineItem {
    LineItem {
        description: code.name().to_lowercase(),
        net_amount: net,
        vat_amount: vat,
        total_amount: net + vat,
        is_refundable: Some(refundable),
        refundable_vat_amount: Some(if refundable { vat } else { Decimal::ZERO }),
        eu_sub_code: refundable.then_some(code),
        ..Default::default()
    }
}

fn ready_doc(id: &str, month: u32, items: Vec<LineItem>) -> Document {
    let created = Utc.with_ymd_and_hms(2025, month, 15, 12, 0, 0).unwrap();
    let mut doc = Document::uploaded(id, "tenant-a", "user-1", "DE", created);
    doc.status = DocumentStatus::ReadyForSubmission;
    doc.line_items = items;
    doc
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap()
}

fn q4_summary() -> SubmissionSummary {
    let docs = [
        ready_doc(
            "doc-1",
            10,
            vec![item(EuSubCode::HotelAccommodation, dec!(431.57), dec!(30.21), true)],
        ),
        ready_doc(
            "doc-2",
            11,
            vec![
                item(EuSubCode::ProfessionalServices, dec!(500.68), dec!(95.13), true),
                item(EuSubCode::RestaurantServices, dec!(40), dec!(7.60), false),
            ],
        ),
    ];
    let request = SubmissionRequest::new("2025-Q4".parse().unwrap(), "DE", None, "tenant-a").unwrap();
    generate_aggregates(&docs, &request).unwrap()
}

#[test]
fn ustveu_snapshot() {
    let xml = to_ustveu_xml(&q4_summary(), generated_at()).unwrap();
    insta::assert_snapshot!("ustveu_q4_2025", xml);
}

#[test]
fn totals_rendered_with_two_decimals() {
    let xml = to_ustveu_xml(&q4_summary(), generated_at()).unwrap();
    assert!(xml.contains("<GesamtErstattungsbetrag>125.34</GesamtErstattungsbetrag>"));
    assert!(xml.contains("<AnzahlPositionen>2</AnzahlPositionen>"));
    assert!(xml.contains("<Zeitraum>Q4/2025</Zeitraum>"));
}

#[test]
fn non_german_submission_rejected() {
    let mut summary = q4_summary();
    summary.country_code = "AT".into();
    let err = to_ustveu_xml(&summary, generated_at()).unwrap_err();
    assert!(matches!(err, ErstattungError::UnsupportedCountry(c) if c == "AT"));
}
