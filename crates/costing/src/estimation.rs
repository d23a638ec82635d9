use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sitedesk_core::{ValueObject, round2, sum2};

use crate::Recomputed;
use crate::line::{LabourCharge, LineItems, Material, TermItem};

/// Working copy of an estimation: three independent line categories plus the
/// optional figures profit is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimationSheet {
    pub materials: LineItems<Material>,
    pub labour: LineItems<LabourCharge>,
    pub terms: LineItems<TermItem>,
    pub quotation_amount: Option<Decimal>,
    pub commission_amount: Option<Decimal>,
}

impl ValueObject for EstimationSheet {}

/// Derived figures of an estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationTotals {
    pub materials_total: Decimal,
    pub labour_total: Decimal,
    pub terms_total: Decimal,
    pub estimated_amount: Decimal,
    /// `None` until both quotation and commission amounts are known.
    pub profit: Option<Decimal>,
}

impl ValueObject for EstimationTotals {}

/// `round2(quotation - estimated - commission)`, defined only when both
/// optional amounts are present.
pub fn profit(
    quotation_amount: Option<Decimal>,
    estimated_amount: Decimal,
    commission_amount: Option<Decimal>,
) -> Option<Decimal> {
    let quotation = quotation_amount?;
    let commission = commission_amount?;
    Some(round2(
        quotation
            .saturating_sub(estimated_amount)
            .saturating_sub(commission),
    ))
}

impl EstimationSheet {
    /// Single forward pass: row totals, category subtotals, estimated amount,
    /// profit.
    pub fn totals(&self) -> EstimationTotals {
        let materials_total = self.materials.subtotal();
        let labour_total = self.labour.subtotal();
        let terms_total = self.terms.subtotal();
        let estimated_amount = sum2([materials_total, labour_total, terms_total]);

        EstimationTotals {
            materials_total,
            labour_total,
            terms_total,
            estimated_amount,
            profit: profit(self.quotation_amount, estimated_amount, self.commission_amount),
        }
    }

    /// A copy with every row total refreshed.
    pub fn recomputed(&self) -> Self {
        Self {
            materials: self.materials.recomputed(),
            labour: self.labour.recomputed(),
            terms: self.terms.recomputed(),
            quotation_amount: self.quotation_amount,
            commission_amount: self.commission_amount,
        }
    }
}

/// Recompute an estimation sheet after an edit.
pub fn recompute_estimation(sheet: &EstimationSheet) -> Recomputed<EstimationSheet, EstimationTotals> {
    let sheet = sheet.recomputed();
    let totals = sheet.totals();
    Recomputed { sheet, totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineItem;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn sheet(materials: Vec<(Decimal, Decimal)>, labour: Vec<(Decimal, Decimal)>) -> EstimationSheet {
        EstimationSheet {
            materials: LineItems::from_rows(
                materials
                    .into_iter()
                    .map(|(quantity, unit_price)| Material {
                        quantity,
                        unit_price,
                        ..Material::default()
                    })
                    .collect(),
            ),
            labour: LineItems::from_rows(
                labour
                    .into_iter()
                    .map(|(quantity_days, price)| LabourCharge {
                        quantity_days,
                        price,
                        ..LabourCharge::default()
                    })
                    .collect(),
            ),
            terms: LineItems::from_rows(Vec::new()),
            quotation_amount: None,
            commission_amount: None,
        }
    }

    #[test]
    fn estimated_amount_sums_all_categories() {
        let totals = sheet(vec![(dec!(2), dec!(50))], vec![(dec!(3), dec!(100))]).totals();
        assert_eq!(totals.materials_total, dec!(100));
        assert_eq!(totals.labour_total, dec!(300));
        assert_eq!(totals.terms_total, dec!(0));
        assert_eq!(totals.estimated_amount, dec!(400.00));
    }

    #[test]
    fn profit_is_undefined_until_both_amounts_are_known() {
        let mut s = sheet(vec![(dec!(1), dec!(100))], vec![]);
        assert_eq!(s.totals().profit, None);

        s.quotation_amount = Some(dec!(150));
        assert_eq!(s.totals().profit, None);

        s.commission_amount = Some(dec!(50));
        assert_eq!(s.totals().profit, Some(dec!(0)));
    }

    #[test]
    fn profit_can_be_negative() {
        assert_eq!(profit(Some(dec!(100)), dec!(120.10), Some(dec!(5))), Some(dec!(-25.10)));
        assert_eq!(profit(None, dec!(1), Some(dec!(1))), None);
    }

    #[test]
    fn recompute_refreshes_stale_row_totals() {
        let mut s = sheet(vec![(dec!(2), dec!(50))], vec![]);
        let mut stale = s.materials.rows()[0].clone();
        stale.set_total(dec!(1));
        s.materials = serde_json::from_value(serde_json::json!([stale])).unwrap();

        let out = recompute_estimation(&s);
        assert_eq!(out.sheet.materials.rows()[0].total, dec!(100));
        assert_eq!(out.totals.estimated_amount, dec!(100));
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let s: EstimationSheet = serde_json::from_str(
            r#"{
                "materials": [{"name": "tiles", "unit": "box", "quantity": 2, "unitPrice": 50}],
                "labour": [{"designation": "tiler", "quantityDays": 3, "price": 100}],
                "terms": [],
                "quotationAmount": "650",
                "commissionAmount": "25.5"
            }"#,
        )
        .unwrap();
        let totals = recompute_estimation(&s).totals;
        assert_eq!(totals.estimated_amount, dec!(400));
        assert_eq!(totals.profit, Some(dec!(224.5)));
    }

    #[test]
    fn oversized_rows_saturate_every_derived_figure() {
        let s: EstimationSheet = serde_json::from_str(
            r#"{
                "materials": [{"quantity": "100000000000000000000", "unitPrice": "10000000000"}],
                "labour": [{"quantityDays": "100000000000000000000", "price": "10000000000"}],
                "terms": [],
                "quotationAmount": "1",
                "commissionAmount": "79228162514264337593543950335"
            }"#,
        )
        .unwrap();
        let out = recompute_estimation(&s);
        assert_eq!(out.totals.materials_total, Decimal::MAX);
        assert_eq!(out.totals.estimated_amount, Decimal::MAX);
        assert_eq!(out.totals.profit, Some(Decimal::MIN));
        assert_eq!(recompute_estimation(&out.sheet).totals, out.totals);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: recomputing twice with no edit in between is a no-op.
        #[test]
        fn recompute_is_idempotent(
            rows in prop::collection::vec((0i64..100_000i64, 0i64..1_000_000i64), 0..8),
            days in prop::collection::vec((0i64..400i64, 0i64..100_000i64), 0..4),
        ) {
            let s = sheet(
                rows.into_iter().map(|(q, p)| (Decimal::new(q, 2), Decimal::new(p, 3))).collect(),
                days.into_iter().map(|(q, p)| (Decimal::new(q, 1), Decimal::new(p, 2))).collect(),
            );
            let once = recompute_estimation(&s);
            let twice = recompute_estimation(&once.sheet);
            prop_assert_eq!(&once.sheet, &twice.sheet);
            prop_assert_eq!(&once.totals, &twice.totals);
        }
    }
}
