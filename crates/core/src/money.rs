//! Monetary rounding.
//!
//! Every derived monetary value is rounded to two decimal places,
//! half away from zero, at the step that produces it. Arithmetic saturates at
//! `Decimal::MAX` / `Decimal::MIN` instead of overflowing.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `round2(quantity * unit_price)`, saturating.
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
    round2(quantity.saturating_mul(unit_price))
}

/// Rounded, saturating sum.
pub fn sum2<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round2(values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add))
}

/// `round2(amount * percentage / 100)`, saturating.
pub fn percent_of(amount: Decimal, percentage: Decimal) -> Decimal {
    let share = match amount.checked_mul(percentage) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => amount.saturating_mul(percentage / Decimal::ONE_HUNDRED),
    };
    round2(share)
}

/// True when a value sits at a saturation bound.
pub fn is_saturated(value: Decimal) -> bool {
    value == Decimal::MAX || value == Decimal::MIN
}
