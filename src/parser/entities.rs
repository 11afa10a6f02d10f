use tracing::{debug, info, warn};

use super::currency::parse_currency;
use super::line_item::parse_line_item;
use crate::core::{
    ErstattungError, ExtractedDocument, LineItem, ParsedAmount, RawEntity, RecognitionResponse,
};

fn parse_amount(text: &str) -> ParsedAmount {
    match parse_currency(text) {
        Some(v) => ParsedAmount::Value(v),
        None => ParsedAmount::Unparseable { raw: text.to_string() },
    }
}

/// Build an unclassified [`LineItem`] from one `line_item` entity text.
pub fn line_item_from_text(text: &str) -> LineItem {
    let parsed = parse_line_item(text);
    LineItem {
        original_text: text.to_string(),
        description: parsed.description,
        net_amount: parsed.net_amount,
        vat_rate: parsed.vat_rate,
        vat_amount: parsed.vat_amount,
        total_amount: parsed.total_amount,
        is_refundable: None,
        refundable_vat_amount: None,
        eu_sub_code: None,
        validation_notes: None,
    }
}

/// Turn a list of recognition entities into an [`ExtractedDocument`].
///
/// Header strings are copied verbatim, header amounts go through
/// [`parse_currency`] (unparseable text is kept as
/// [`ParsedAmount::Unparseable`]), each `line_item` becomes an unclassified
/// [`LineItem`], and unknown types land in `other_fields`.
pub fn parse_entities(entities: &[RawEntity], source: &str) -> ExtractedDocument {
    info!(source, entity_count = entities.len(), "parsing recognition entities");

    let mut doc = ExtractedDocument::default();

    for entity in entities {
        let text = entity.text.as_str();
        debug!(entity_type = %entity.entity_type, text, "entity");

        match entity.entity_type.as_str() {
            "" => continue,
            "invoice_id" => doc.invoice_id = Some(text.to_string()),
            "invoice_date" => doc.invoice_date = Some(text.to_string()),
            "supplier_name" => doc.supplier_name = Some(text.to_string()),
            "currency" => doc.currency = Some(text.to_string()),
            "total_amount" => doc.total_amount = Some(parse_amount(text)),
            "net_amount" => doc.net_amount = Some(parse_amount(text)),
            "vat_amount" => doc.vat_amount = Some(parse_amount(text)),
            "line_item" => doc.line_items.push(line_item_from_text(text)),
            other => {
                doc.other_fields.insert(other.to_string(), text.to_string());
            }
        }
    }

    for (field, amount) in [
        ("total_amount", &doc.total_amount),
        ("net_amount", &doc.net_amount),
        ("vat_amount", &doc.vat_amount),
    ] {
        if let Some(ParsedAmount::Unparseable { raw }) = amount {
            warn!(source, field, raw = %raw, "header amount could not be parsed");
        }
    }

    info!(
        source,
        invoice_id = doc.invoice_id.as_deref(),
        supplier = doc.supplier_name.as_deref(),
        line_items = doc.line_items.len(),
        "parsed recognition entities"
    );

    doc
}

/// Parse a full recognition response.
///
/// Fails only when the response carries no entity list at all; an empty
/// list gives an empty document.
pub fn parse_document_ai_entities(
    response: &RecognitionResponse,
    source: &str,
) -> Result<ExtractedDocument, ErstattungError> {
    let Some(entities) = &response.entities else {
        warn!(source, "recognition response carried no entities");
        return Err(ErstattungError::NoEntities);
    };
    Ok(parse_entities(entities, source))
}

/// Decode a JSON recognition response and parse it.
#[cfg(feature = "json")]
pub fn parse_recognition_json(json: &str, source: &str) -> Result<ExtractedDocument, ErstattungError> {
    let response: RecognitionResponse = serde_json::from_str(json)
        .map_err(|e| ErstattungError::MalformedResponse(e.to_string()))?;
    parse_document_ai_entities(&response, source)
}
