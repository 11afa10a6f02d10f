use erstattung::core::*;
use erstattung::parser::*;
use rust_decimal_macros::dec;

fn entities(pairs: &[(&str, &str)]) -> Vec<RawEntity> {
    pairs.iter().map(|(t, x)| RawEntity::new(*t, *x)).collect()
}

// --- Currency ---

#[test]
fn currency_conventions() {
    assert_eq!(parse_currency("€1.234,56"), Some(dec!(1234.56)));
    assert_eq!(parse_currency("$1,234.56"), Some(dec!(1234.56)));
    assert_eq!(parse_currency("€123,45"), Some(dec!(123.45)));
    assert_eq!(parse_currency("€ 1.000,00"), Some(dec!(1000)));
    assert_eq!(parse_currency("1234"), Some(dec!(1234)));
}

#[test]
fn currency_unparseable() {
    assert_eq!(parse_currency(""), None);
    assert_eq!(parse_currency("invalid"), None);
    assert_eq!(parse_currency("€abc.def"), None);
}

#[test]
fn currency_credit_amounts() {
    assert_eq!(parse_currency("-€50,00"), Some(dec!(-50)));
    assert_eq!(parse_currency("-$50.00"), Some(dec!(-50)));
}

// --- Line items ---

#[test]
fn line_item_explicit_rate() {
    let item = parse_line_item("Conference registration fee €500.00 + 19% VAT");
    assert_eq!(item.net_amount, dec!(500));
    assert_eq!(item.vat_rate, dec!(19));
    assert_eq!(item.vat_amount, dec!(95));
    assert_eq!(item.total_amount, dec!(595));
    assert_eq!(item.description, "Conference registration fee €500.00 + 19% VAT");
}

#[test]
fn line_item_european_amount_with_rate() {
    let item = parse_line_item("Hotel Übernachtung €1.200,00 + 7% VAT");
    assert_eq!(item.net_amount, dec!(1200));
    assert_eq!(item.vat_amount, dec!(84));
    assert_eq!(item.total_amount, dec!(1284));
}

#[test]
fn line_item_back_computes_rate_from_total() {
    let item = parse_line_item("Taxi to airport €50.00 total €59.50");
    assert_eq!(item.net_amount, dec!(50));
    assert_eq!(item.total_amount, dec!(59.50));
    assert_eq!(item.vat_amount, dec!(9.50));
    assert_eq!(item.vat_rate, dec!(19));
}

#[test]
fn line_item_without_amounts() {
    let item = parse_line_item("Service charge included");
    assert_eq!(item.net_amount, dec!(0));
    assert_eq!(item.vat_amount, dec!(0));
    assert_eq!(item.total_amount, dec!(0));
}

#[test]
fn line_item_rate_case_insensitive() {
    let item = parse_line_item("Printer paper $20.00 + 10% vat");
    assert_eq!(item.vat_rate, dec!(10));
    assert_eq!(item.vat_amount, dec!(2));
}

// --- Entities ---

#[test]
fn full_invoice_entities() {
    let doc = parse_entities(
        &entities(&[
            ("invoice_id", "INV-2025-001"),
            ("invoice_date", "2025-08-11"),
            ("supplier_name", "Test Hotel & Conference Center Ltd"),
            ("currency", "€"),
            ("total_amount", "€1.428,00"),
            ("net_amount", "€1.200,00"),
            ("vat_amount", "€228,00"),
            ("line_item", "Hotel accommodation - 3 nights €600.00 + 19% VAT"),
            ("line_item", "Conference registration €600.00 + 19% VAT"),
            ("payment_terms", "Net 30"),
        ]),
        "tenants/t1/inv.pdf",
    );
    assert_eq!(doc.invoice_id.as_deref(), Some("INV-2025-001"));
    assert_eq!(doc.invoice_date.as_deref(), Some("2025-08-11"));
    assert_eq!(doc.currency_code(), Some("EUR"));
    assert_eq!(doc.total(), Some(dec!(1428)));
    assert_eq!(doc.net_amount.as_ref().and_then(ParsedAmount::value), Some(dec!(1200)));
    assert_eq!(doc.line_items.len(), 2);
    assert_eq!(doc.line_items[0].vat_amount, dec!(114));
    assert!(doc.line_items.iter().all(|i| !i.is_classified()));
    assert_eq!(doc.other_fields.get("payment_terms").map(String::as_str), Some("Net 30"));
}

#[test]
fn entity_order_does_not_matter_for_headers() {
    let a = parse_entities(
        &entities(&[("invoice_id", "A"), ("total_amount", "€10,00")]),
        "x",
    );
    let b = parse_entities(
        &entities(&[("total_amount", "€10,00"), ("invoice_id", "A")]),
        "x",
    );
    assert_eq!(a, b);
}

#[test]
fn bad_header_amount_does_not_abort_document() {
    let doc = parse_entities(
        &entities(&[
            ("total_amount", "see attachment"),
            ("line_item", "Taxi €20.00 + 19% VAT"),
        ]),
        "x",
    );
    assert!(doc.total_amount.as_ref().is_some_and(ParsedAmount::is_unparseable));
    assert_eq!(doc.total(), None);
    assert_eq!(doc.line_items.len(), 1);
}

#[test]
fn response_without_entities_fails() {
    let err = parse_document_ai_entities(&RecognitionResponse::default(), "x").unwrap_err();
    assert_eq!(err.to_string(), "No entities found in Document AI response");
}

#[cfg(feature = "json")]
mod json {
    use super::*;

    #[test]
    fn decodes_recognition_wire_names() {
        let json = r#"{
            "entities": [
                {"type": "invoice_id", "mentionText": "INV-42"},
                {"type": "line_item", "mentionText": "Taxi €20.00 + 19% VAT"},
                {"type": "", "mentionText": "noise"}
            ]
        }"#;
        let doc = parse_recognition_json(json, "x").unwrap();
        assert_eq!(doc.invoice_id.as_deref(), Some("INV-42"));
        assert_eq!(doc.line_items[0].vat_amount, dec!(3.8));
        assert!(doc.other_fields.is_empty());
    }

    #[test]
    fn missing_entities_key() {
        let err = parse_recognition_json("{}", "x").unwrap_err();
        assert!(matches!(err, ErstattungError::NoEntities));
    }

    #[test]
    fn malformed_json() {
        let err = parse_recognition_json("{not json", "x").unwrap_err();
        assert!(matches!(err, ErstattungError::MalformedResponse(_)));
    }
}
