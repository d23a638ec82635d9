//! Estimation and quotation arithmetic.
//!
//! Every function here is pure: callers hand in a full sheet snapshot after
//! each edit and receive a full recomputed snapshot plus its totals.

pub mod estimation;
pub mod line;
pub mod quotation;
pub mod submission;

pub use estimation::{EstimationSheet, EstimationTotals, profit, recompute_estimation};
pub use line::{LabourCharge, LineItem, LineItems, Material, QuotationItem, TermItem};
pub use quotation::{QuotationSheet, QuotationTotals, recompute_quotation};
pub use submission::{EstimationSubmission, QuotationSubmission};

/// A recomputed sheet together with the totals derived from it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Recomputed<S, T> {
    pub sheet: S,
    pub totals: T,
}
