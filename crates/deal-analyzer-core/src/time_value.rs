use rust_decimal::{Decimal, MathematicalOps};

use crate::math::safe_div;
use crate::types::{Money, Rate};

/// Level payment that fully amortises `principal` over `num_payments` periods.
///
/// `P * r(1+r)^n / ((1+r)^n - 1)`, evaluated as `P * r / (1 - (1+r)^-n)`.
///
/// * `num_payments == 0` has no debt service and returns zero.
/// * A zero rate amortises in a straight line: `P / n`.
/// * If `(1+r)^n` leaves the decimal range the payment is its limit, `P * r`.
pub fn amortizing_payment(principal: Money, periodic_rate: Rate, num_payments: u32) -> Money {
    if num_payments == 0 {
        return Decimal::ZERO;
    }

    if periodic_rate.is_zero() {
        return principal / Decimal::from(num_payments);
    }

    let interest = principal.saturating_mul(periodic_rate);
    let one_plus_r = Decimal::ONE + periodic_rate;
    let Some(compound) = one_plus_r.checked_powi(i64::from(num_payments)) else {
        return interest;
    };

    // (1+r) == 0 makes every payment after the first worthless
    if compound.is_zero() {
        return Decimal::ZERO;
    }

    let denominator = Decimal::ONE - Decimal::ONE / compound;
    safe_div(interest, denominator)
}
