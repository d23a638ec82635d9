//! Payloads handed to the estimation/quotation create and update endpoints.
//!
//! The persisted totals are exactly the ones computed here; nothing is
//! recomputed downstream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sitedesk_core::{DomainError, DomainResult, EstimationId, ProjectId, is_saturated};

use crate::estimation::{EstimationSheet, EstimationTotals, recompute_estimation};
use crate::line::{LineItem, LineItems};
use crate::quotation::{QuotationSheet, QuotationTotals, recompute_quotation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationSubmission {
    pub project_id: ProjectId,
    #[serde(flatten)]
    pub sheet: EstimationSheet,
    #[serde(flatten)]
    pub totals: EstimationTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSubmission {
    pub project_id: ProjectId,
    pub estimation_id: EstimationId,
    #[serde(flatten)]
    pub sheet: QuotationSheet,
    /// Nested: `vatPercentage` would otherwise appear twice.
    pub totals: QuotationTotals,
}

impl EstimationSubmission {
    /// Validate and freeze an estimation sheet for submission.
    ///
    /// Blank rows are dropped; negative quantities or prices are rejected.
    pub fn prepare(project_id: ProjectId, sheet: &EstimationSheet) -> DomainResult<Self> {
        let sheet = EstimationSheet {
            materials: sheet.materials.without_blank_rows(),
            labour: sheet.labour.without_blank_rows(),
            terms: sheet.terms.without_blank_rows(),
            quotation_amount: sheet.quotation_amount,
            commission_amount: sheet.commission_amount,
        };

        ensure_non_negative("materials", &sheet.materials)?;
        ensure_non_negative("labour", &sheet.labour)?;
        ensure_non_negative("terms", &sheet.terms)?;

        if sheet.materials.is_empty() && sheet.labour.is_empty() && sheet.terms.is_empty() {
            return Err(DomainError::validation("estimation has no line items"));
        }
        ensure_non_negative_amount("quotationAmount", sheet.quotation_amount)?;
        ensure_non_negative_amount("commissionAmount", sheet.commission_amount)?;

        let out = recompute_estimation(&sheet);
        ensure_representable("estimatedAmount", out.totals.estimated_amount)?;
        Ok(Self {
            project_id,
            sheet: out.sheet,
            totals: out.totals,
        })
    }
}

impl QuotationSubmission {
    /// Validate and freeze a quotation sheet for submission.
    pub fn prepare(
        project_id: ProjectId,
        estimation_id: EstimationId,
        sheet: &QuotationSheet,
    ) -> DomainResult<Self> {
        let sheet = QuotationSheet {
            items: sheet.items.without_blank_rows(),
            vat_percentage: sheet.vat_percentage,
        };

        ensure_non_negative("items", &sheet.items)?;
        if sheet.items.is_empty() {
            return Err(DomainError::validation("quotation has no items"));
        }
        if let Some(vat) = sheet.vat_percentage {
            if vat < Decimal::ZERO || vat > Decimal::ONE_HUNDRED {
                return Err(DomainError::validation(format!(
                    "vatPercentage must be within 0..=100, got {vat}"
                )));
            }
        }

        let out = recompute_quotation(&sheet);
        ensure_representable("netAmount", out.totals.net_amount)?;
        Ok(Self {
            project_id,
            estimation_id,
            sheet: out.sheet,
            totals: out.totals,
        })
    }
}

fn ensure_non_negative<T: LineItem>(category: &str, items: &LineItems<T>) -> DomainResult<()> {
    for (index, row) in items.iter().enumerate() {
        if row.quantity() < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "{category}[{index}]: quantity must not be negative"
            )));
        }
        if row.unit_price() < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "{category}[{index}]: price must not be negative"
            )));
        }
    }
    Ok(())
}

fn ensure_non_negative_amount(field: &str, amount: Option<Decimal>) -> DomainResult<()> {
    match amount {
        Some(value) if value < Decimal::ZERO => Err(DomainError::validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

/// Saturated totals are fine while editing but are never persisted.
fn ensure_representable(field: &str, amount: Decimal) -> DomainResult<()> {
    if is_saturated(amount) {
        return Err(DomainError::validation(format!(
            "{field} exceeds the supported range"
        )));
    }
    Ok(())
}
