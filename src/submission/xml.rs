//! German refund application (UStVEU) rendering.

use std::io::Cursor;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use super::aggregate::SubmissionSummary;
use crate::core::ErstattungError;

pub const USTVEU_NAMESPACE: &str = "http://www.elster.de/elsterxml/schema/v11";
pub const USTVEU_VERSION: &str = "2024";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const PRODUCER: &str = "VAT-Refund-App";

fn xml_io(e: std::io::Error) -> ErstattungError {
    ErstattungError::Xml(format!("write error: {e}"))
}

struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    fn new() -> Result<Self, ErstattungError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    fn into_string(self) -> Result<String, ErstattungError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| ErstattungError::Xml(format!("UTF-8 error: {e}")))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, ErstattungError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer.write_event(Event::Start(elem)).map_err(xml_io)?;
        Ok(self)
    }

    fn end(&mut self, name: &str) -> Result<&mut Self, ErstattungError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn text(&mut self, name: &str, text: &str) -> Result<&mut Self, ErstattungError> {
        self.start(name, &[])?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end(name)
    }

    fn amount(&mut self, name: &str, amount: Decimal) -> Result<&mut Self, ErstattungError> {
        self.text(name, &format_amount(amount))
    }
}

/// Two decimals, half away from zero.
pub fn format_amount(d: Decimal) -> String {
    let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Render `summary` as a UStVEU refund application.
///
/// `generated_at` becomes the creation date in the summary block.
///
/// # Errors
///
/// [`ErstattungError::UnsupportedCountry`] for any country but `DE`.
pub fn to_ustveu_xml(
    summary: &SubmissionSummary,
    generated_at: DateTime<Utc>,
) -> Result<String, ErstattungError> {
    if summary.country_code != "DE" {
        return Err(ErstattungError::UnsupportedCountry(summary.country_code.clone()));
    }

    let period = summary.period.to_string();
    let mut w = XmlWriter::new()?;
    w.start(
        "UStVEU",
        &[
            ("version", USTVEU_VERSION),
            ("xmlns", USTVEU_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
        ],
    )?;

    w.start("Header", &[])?
        // N = production, J = test
        .text("Testmerker", "N")?
        .text("Hersteller", PRODUCER)?
        .text("DatenArt", "UStVEU")?
        .text("Verfahren", "UStVEU")?
        .text("Zeitraum", &period)?
        .end("Header")?;

    w.start("Antragsteller", &[])?
        .text("TenantId", &summary.tenant_id)?
        .text("Period", &period)?
        .text("Country", &summary.country_code)?
        .end("Antragsteller")?;

    w.start("UmsatzsteuerDetails", &[])?;
    for agg in &summary.aggregates {
        w.start("Position", &[])?
            .text("EUSubCode", agg.sub_code.code())?
            .amount("NettoSumme", agg.total_net_amount)?
            .amount("UmsatzsteuerSumme", agg.total_vat_amount)?
            .amount("ErstattungsberechtigterBetrag", agg.total_refundable_vat_amount)?
            .text("AnzahlBelege", &agg.document_count.to_string())?
            .end("Position")?;
    }
    w.end("UmsatzsteuerDetails")?;

    w.start("Zusammenfassung", &[])?
        .amount("GesamtErstattungsbetrag", summary.total_refund_amount)?
        .text("AnzahlPositionen", &summary.aggregates.len().to_string())?
        .text(
            "Erstellungsdatum",
            &generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        )?
        .end("Zusammenfassung")?;

    w.end("UStVEU")?;
    let xml = w.into_string()?;
    info!(
        period = %period,
        tenant_id = %summary.tenant_id,
        bytes = xml.len(),
        "UStVEU document rendered"
    );
    Ok(xml)
}
