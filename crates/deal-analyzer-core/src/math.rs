//! Guarded arithmetic shared by every deal calculation.
//!
//! Each ratio the model reports has a zero (or non-positive) denominator case
//! that must yield `0` instead of a panic. Routing all of them through these
//! helpers keeps that guard in one place.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

pub const HUNDRED: Decimal = dec!(100);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// `numerator / denominator`, or zero when the denominator is zero.
/// Quotients beyond the decimal range clamp to `Decimal::MAX` / `Decimal::MIN`.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        clamped_div(numerator, denominator)
    }
}

/// `numerator / denominator * 100`, or zero unless the denominator is positive.
pub fn ratio_pct(numerator: Decimal, denominator: Decimal) -> Percent {
    if denominator > Decimal::ZERO {
        clamped_div(numerator, denominator).saturating_mul(HUNDRED)
    } else {
        Decimal::ZERO
    }
}

/// `pct` percent of `base`.
pub fn pct_of(base: Money, pct: Percent) -> Money {
    base.saturating_mul(pct / HUNDRED)
}

/// Convert a plain percentage (3.25) into a decimal rate (0.0325).
pub fn pct_to_rate(pct: Percent) -> Decimal {
    pct / HUNDRED
}

/// Sum that saturates at the decimal range instead of overflowing.
pub fn saturating_sum<I>(terms: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    terms
        .into_iter()
        .fold(Decimal::ZERO, |acc, term| acc.saturating_add(term))
}

fn clamped_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}
