use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sitedesk_core::{ValueObject, percent_of};

use crate::Recomputed;
use crate::line::{LineItems, QuotationItem};

/// Working copy of a quotation: a flat item list plus its VAT rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotationSheet {
    pub items: LineItems<QuotationItem>,
    /// Percentage in `[0, 100]`; absent means no VAT.
    pub vat_percentage: Option<Decimal>,
}

impl ValueObject for QuotationSheet {}

/// Derived figures of a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationTotals {
    pub subtotal: Decimal,
    pub vat_percentage: Decimal,
    pub vat_amount: Decimal,
    pub net_amount: Decimal,
}

impl ValueObject for QuotationTotals {}

impl QuotationSheet {
    pub fn totals(&self) -> QuotationTotals {
        let subtotal = self.items.subtotal();
        let vat_percentage = self.vat_percentage.unwrap_or(Decimal::ZERO);
        let vat_amount = percent_of(subtotal, vat_percentage);

        QuotationTotals {
            subtotal,
            vat_percentage,
            vat_amount,
            net_amount: subtotal.saturating_add(vat_amount),
        }
    }

    pub fn recomputed(&self) -> Self {
        Self {
            items: self.items.recomputed(),
            vat_percentage: self.vat_percentage,
        }
    }
}

/// Recompute a quotation sheet after an edit.
pub fn recompute_quotation(sheet: &QuotationSheet) -> Recomputed<QuotationSheet, QuotationTotals> {
    let sheet = sheet.recomputed();
    let totals = sheet.totals();
    Recomputed { sheet, totals }
}
