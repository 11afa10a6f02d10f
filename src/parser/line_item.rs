use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::currency::parse_currency;

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[€$]\s?[0-9]+(?:[.,][0-9]+)*").unwrap());
static VAT_RATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+(?:[.,][0-9]+)?)\s*%\s*VAT").unwrap());

/// Numeric fields read from one line-item text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLineItem {
    /// Always the full original text.
    pub description: String,
    pub net_amount: Decimal,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub total_amount: Decimal,
}

/// Extract amounts and the VAT rate from a line-item text.
///
/// The first `€`/`$` amount is the net amount. An explicit `"<n>% VAT"` rate
/// derives VAT and total from it; otherwise, with two or more amounts, the last
/// one is the total and the rate is back-computed. Without amounts every
/// numeric field stays zero.
pub fn parse_line_item(text: &str) -> ParsedLineItem {
    let mut item = ParsedLineItem {
        description: text.to_string(),
        net_amount: Decimal::ZERO,
        vat_rate: Decimal::ZERO,
        vat_amount: Decimal::ZERO,
        total_amount: Decimal::ZERO,
    };

    let amounts: Vec<Decimal> = AMOUNT
        .find_iter(text)
        .filter_map(|m| parse_currency(m.as_str()))
        .collect();

    // a rate without any amount is ignored
    let Some(&net) = amounts.first() else {
        return item;
    };
    item.net_amount = net;

    if let Some(rate) = VAT_RATE
        .captures(text)
        .and_then(|c| Decimal::from_str(&c[1].replace(',', ".")).ok())
    {
        item.vat_rate = rate;
    }

    // amounts near Decimal::MAX overflow; such lines keep zero VAT
    if item.vat_rate > Decimal::ZERO {
        let vat = net
            .checked_mul(item.vat_rate)
            .and_then(|v| v.checked_div(dec!(100)));
        if let Some((vat, total)) = vat.and_then(|v| Some((v, net.checked_add(v)?))) {
            item.vat_amount = vat;
            item.total_amount = total;
        }
    } else if let [_, .., last] = amounts.as_slice() {
        item.total_amount = *last;
        item.vat_amount = last.checked_sub(net).unwrap_or(Decimal::ZERO);
        if net > Decimal::ZERO && item.vat_amount > Decimal::ZERO {
            if let Some(rate) = item
                .vat_amount
                .checked_div(net)
                .and_then(|r| r.checked_mul(dec!(100)))
            {
                item.vat_rate =
                    rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            }
        }
    }

    item
}
