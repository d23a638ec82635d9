use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sitedesk_core::{line_total, sum2};

/// A priced row: two raw inputs and a derived total.
///
/// Invariant after any recompute: `total() == round2(quantity() * unit_price())`,
/// saturated at the `Decimal` bounds.
/// Inputs may be zero or negative while a row is being edited; the arithmetic
/// result is propagated as-is.
pub trait LineItem: Clone + Default + PartialEq + core::fmt::Debug {
    fn quantity(&self) -> Decimal;

    fn unit_price(&self) -> Decimal;

    /// Stored total (as last recomputed).
    fn total(&self) -> Decimal;

    fn set_total(&mut self, total: Decimal);

    /// True when no input has been entered yet.
    fn is_blank(&self) -> bool;

    /// The total this row's inputs produce; saturates on overflow.
    fn expected_total(&self) -> Decimal {
        line_total(self.quantity(), self.unit_price())
    }

    fn recompute(&mut self) {
        let total = self.expected_total();
        self.set_total(total);
    }
}

/// Material row of an estimation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    pub name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Labour row of an estimation, priced per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabourCharge {
    pub designation: String,
    pub quantity_days: Decimal,
    pub price: Decimal,
    pub total: Decimal,
}

/// Terms-and-conditions row of an estimation (transport, permits, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TermItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Client-facing quotation row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotationItem {
    pub description: String,
    pub uom: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl LineItem for Material {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn total(&self) -> Decimal {
        self.total
    }

    fn set_total(&mut self, total: Decimal) {
        self.total = total;
    }

    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.quantity.is_zero() && self.unit_price.is_zero()
    }
}

impl LineItem for LabourCharge {
    fn quantity(&self) -> Decimal {
        self.quantity_days
    }

    fn unit_price(&self) -> Decimal {
        self.price
    }

    fn total(&self) -> Decimal {
        self.total
    }

    fn set_total(&mut self, total: Decimal) {
        self.total = total;
    }

    fn is_blank(&self) -> bool {
        self.designation.trim().is_empty() && self.quantity_days.is_zero() && self.price.is_zero()
    }
}

impl LineItem for TermItem {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn total(&self) -> Decimal {
        self.total
    }

    fn set_total(&mut self, total: Decimal) {
        self.total = total;
    }

    fn is_blank(&self) -> bool {
        self.description.trim().is_empty() && self.quantity.is_zero() && self.unit_price.is_zero()
    }
}

impl LineItem for QuotationItem {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn total(&self) -> Decimal {
        self.total_price
    }

    fn set_total(&mut self, total: Decimal) {
        self.total_price = total;
    }

    fn is_blank(&self) -> bool {
        self.description.trim().is_empty() && self.quantity.is_zero() && self.unit_price.is_zero()
    }
}

/// Editable collection of rows of one category.
///
/// A fresh collection holds a single blank row. Every mutation recomputes the
/// affected row before returning, so stored totals are never stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItems<T>(Vec<T>);

impl<T: LineItem> LineItems<T> {
    pub fn new() -> Self {
        Self(vec![T::default()])
    }

    /// Build from existing rows, recomputing each total.
    pub fn from_rows(rows: Vec<T>) -> Self {
        let mut items = Self(rows);
        items.recompute_all();
        items
    }

    pub fn rows(&self) -> &[T] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn push_blank(&mut self) {
        self.0.push(T::default());
    }

    pub fn push(&mut self, mut row: T) {
        row.recompute();
        self.0.push(row);
    }

    /// Remove a row. Removing the only row resets it to blank instead.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.0.len() {
            return None;
        }
        if self.0.len() == 1 {
            return Some(core::mem::take(&mut self.0[0]));
        }
        Some(self.0.remove(index))
    }

    /// Edit a row in place; its total is recomputed afterwards.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn update(&mut self, index: usize, edit: impl FnOnce(&mut T)) -> bool {
        match self.0.get_mut(index) {
            Some(row) => {
                edit(row);
                row.recompute();
                true
            }
            None => false,
        }
    }

    pub fn recompute_all(&mut self) {
        for row in &mut self.0 {
            row.recompute();
        }
    }

    /// A copy with every total recomputed.
    pub fn recomputed(&self) -> Self {
        Self::from_rows(self.0.clone())
    }

    /// Sum of row totals, derived from the inputs rather than stored totals.
    pub fn subtotal(&self) -> Decimal {
        sum2(self.0.iter().map(T::expected_total))
    }

    /// A copy without fully blank rows.
    pub fn without_blank_rows(&self) -> Self {
        Self(self.0.iter().filter(|r| !r.is_blank()).cloned().collect())
    }
}

impl<T: LineItem> Default for LineItems<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LineItem> From<Vec<T>> for LineItems<T> {
    fn from(rows: Vec<T>) -> Self {
        Self::from_rows(rows)
    }
}
