use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::math::{pct_of, pct_to_rate, ratio_pct, saturating_sum, MONTHS_PER_YEAR};
use crate::time_value::amortizing_payment;
use crate::types::{Money, Percent, Rate};

use super::inputs::DealInputs;

/// Annual PMI premium as a fraction of the loan amount.
pub const PMI_ANNUAL_RATE: Rate = dec!(0.005);

/// PMI applies only when the down payment is strictly below this percentage.
pub const PMI_DOWN_PAYMENT_THRESHOLD: Percent = dec!(20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline metrics derived from a [`DealInputs`]. Holds no independent state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealMetrics {
    /// Rent plus other income, per month
    pub monthly_income: Money,
    /// Debt service plus operating expenses, per month
    pub monthly_expenses: Money,
    /// Down payment + closing costs + repairs + fees
    pub total_cash_needed: Money,
    /// Annual net operating income (excludes debt service)
    pub noi: Money,
    /// Net monthly cash flow
    pub net_cfpu: Money,
    /// Annual cash flow / total cash needed, in %
    pub cash_on_cash: Percent,
    /// NOI / purchase price, in %
    pub cap_rate: Percent,
    /// Monthly income / purchase price, in %
    pub one_percent_rule: Percent,
    /// Monthly principal and interest
    pub mortgage_payment: Money,
    /// Monthly PMI
    pub mortgage_insurance: Money,
}

/// Intermediate values of the same derivation, for display and audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealBreakdown {
    pub loan_amount: Money,
    pub monthly_rate: Rate,
    pub num_payments: u32,
    pub down_payment: Money,
    pub closing_costs: Money,
    pub maintenance_amount: Money,
    pub capex_amount: Money,
    pub property_mgmt_amount: Money,
    pub vacancy_amount: Money,
    /// Monthly expenses excluding mortgage payment and PMI
    pub monthly_operating_expenses: Money,
    pub annual_rent: Money,
    pub annual_operating_expenses: Money,
    pub annual_cash_flow: Money,
    pub annual_property_tax: Money,
    pub annual_property_insurance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive every deal metric from the inputs.
///
/// Pure and total: identical inputs give identical outputs, and every
/// division is guarded so degenerate deals (zero price, zero cash in, zero
/// term, zero rate) yield `0` rather than failing.
///
/// Results are exact for the range [`analyze_deal`](super::analyze_deal)
/// accepts: amounts up to `1e15` and percentages up to `100`. Outside it the
/// arithmetic saturates at `Decimal::MAX` / `Decimal::MIN` instead of
/// panicking, so the figures are bounded but no longer meaningful.
pub fn compute(inputs: &DealInputs) -> DealMetrics {
    compute_with_breakdown(inputs).0
}

/// Same derivation as [`compute`], also returning the intermediates.
pub fn compute_with_breakdown(inputs: &DealInputs) -> (DealMetrics, DealBreakdown) {
    // --- Financing ---
    let loan_amount = inputs
        .purchase_price
        .saturating_mul(Decimal::ONE - pct_to_rate(inputs.down_payment_percentage));
    let monthly_rate = pct_to_rate(inputs.interest_rate) / MONTHS_PER_YEAR;
    let num_payments = inputs.mortgage_length.saturating_mul(12);
    let mortgage_payment = amortizing_payment(loan_amount, monthly_rate, num_payments);

    // --- Income ---
    let monthly_income = inputs.monthly_rent.saturating_add(inputs.other_income);

    let mortgage_insurance = if pmi_applies(inputs) {
        loan_amount.saturating_mul(PMI_ANNUAL_RATE) / MONTHS_PER_YEAR
    } else {
        Decimal::ZERO
    };

    // --- Expenses ---
    let maintenance_amount = pct_of(monthly_income, inputs.maintenance_repairs);
    let capex_amount = pct_of(monthly_income, inputs.capex);
    let property_mgmt_amount = pct_of(monthly_income, inputs.property_management);
    let vacancy_amount = pct_of(monthly_income, inputs.vacancy);

    // Everything except debt service; summed on its own so NOI does not
    // inherit rounding from adding and then subtracting the payment.
    let monthly_operating_expenses = saturating_sum([
        inputs.property_tax,
        inputs.property_insurance,
        maintenance_amount,
        capex_amount,
        property_mgmt_amount,
        vacancy_amount,
        inputs.sewer,
        inputs.water,
        inputs.lawn_snow,
        inputs.garbage,
        inputs.electric,
        inputs.gas,
        inputs.hoa,
        inputs.other_expenses,
    ]);
    let monthly_expenses =
        saturating_sum([mortgage_payment, mortgage_insurance, monthly_operating_expenses]);

    let net_cfpu = monthly_income.saturating_sub(monthly_expenses);

    // --- Cash required ---
    let down_payment = pct_of(inputs.purchase_price, inputs.down_payment_percentage);
    let closing_costs = pct_of(inputs.purchase_price, inputs.closing_costs_percentage);
    let total_cash_needed =
        saturating_sum([down_payment, closing_costs, inputs.repair_costs, inputs.fees]);

    // --- Annual figures ---
    let annual_rent = monthly_income.saturating_mul(MONTHS_PER_YEAR);
    let annual_operating_expenses = monthly_operating_expenses.saturating_mul(MONTHS_PER_YEAR);
    let noi = annual_rent.saturating_sub(annual_operating_expenses);
    let annual_cash_flow = net_cfpu.saturating_mul(MONTHS_PER_YEAR);

    // --- Returns ---
    let cash_on_cash = ratio_pct(annual_cash_flow, total_cash_needed);
    let cap_rate = ratio_pct(noi, inputs.purchase_price);
    let one_percent_rule = ratio_pct(monthly_income, inputs.purchase_price);

    let metrics = DealMetrics {
        monthly_income,
        monthly_expenses,
        total_cash_needed,
        noi,
        net_cfpu,
        cash_on_cash,
        cap_rate,
        one_percent_rule,
        mortgage_payment,
        mortgage_insurance,
    };

    let breakdown = DealBreakdown {
        loan_amount,
        monthly_rate,
        num_payments,
        down_payment,
        closing_costs,
        maintenance_amount,
        capex_amount,
        property_mgmt_amount,
        vacancy_amount,
        monthly_operating_expenses,
        annual_rent,
        annual_operating_expenses,
        annual_cash_flow,
        annual_property_tax: inputs.property_tax.saturating_mul(MONTHS_PER_YEAR),
        annual_property_insurance: inputs.property_insurance.saturating_mul(MONTHS_PER_YEAR),
    };

    (metrics, breakdown)
}

/// PMI is charged iff enabled and the down payment is strictly below 20%.
pub fn pmi_applies(inputs: &DealInputs) -> bool {
    inputs.pmi_enabled && inputs.down_payment_percentage < PMI_DOWN_PAYMENT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_seed_scenario() {
        let (m, b) = compute_with_breakdown(&DealInputs::default());

        assert_eq!(b.loan_amount, dec!(144000));
        assert_eq!(b.num_payments, 360);
        assert_close(m.mortgage_payment, dec!(626.697), dec!(0.001));
        // Exactly 20% down: no PMI even though it is enabled
        assert_eq!(m.mortgage_insurance, Decimal::ZERO);
        assert_eq!(m.monthly_income, dec!(2200));
        assert_eq!(b.down_payment, dec!(36000));
        assert_eq!(b.closing_costs, dec!(3600));
        assert_eq!(m.total_cash_needed, dec!(49600));
    }

    #[test]
    fn test_seed_expense_lines() {
        let (m, b) = compute_with_breakdown(&DealInputs::default());

        assert_eq!(b.maintenance_amount, dec!(110));
        assert_eq!(b.capex_amount, dec!(110));
        assert_eq!(b.property_mgmt_amount, Decimal::ZERO);
        assert_eq!(b.vacancy_amount, dec!(66));
        // 150 + 100 + 110 + 110 + 0 + 66 + 50 + 50 + 25
        assert_eq!(b.monthly_operating_expenses, dec!(661));
        assert_close(m.monthly_expenses, dec!(1287.697), dec!(0.001));
        assert_close(m.net_cfpu, dec!(912.303), dec!(0.001));
    }

    #[test]
    fn test_seed_returns() {
        let (m, b) = compute_with_breakdown(&DealInputs::default());

        assert_eq!(b.annual_rent, dec!(26400));
        assert_eq!(b.annual_operating_expenses, dec!(7932));
        assert_eq!(m.noi, dec!(18468));
        assert_eq!(m.cap_rate, dec!(10.26));
        assert_close(m.cash_on_cash, dec!(22.0718), dec!(0.001));
        assert_close(m.one_percent_rule, dec!(1.2222), dec!(0.0001));
    }

    #[test]
    fn test_pmi_below_threshold() {
        let inputs = DealInputs {
            down_payment_percentage: dec!(10),
            ..DealInputs::default()
        };
        let m = compute(&inputs);
        // Loan 162000 * 0.5% / 12 = 67.5
        assert_eq!(m.mortgage_insurance, dec!(67.5));
    }

    #[test]
    fn test_pmi_disabled() {
        let inputs = DealInputs {
            down_payment_percentage: dec!(5),
            pmi_enabled: false,
            ..DealInputs::default()
        };
        assert_eq!(compute(&inputs).mortgage_insurance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_purchase_price_guards_ratios() {
        let inputs = DealInputs {
            purchase_price: Decimal::ZERO,
            ..DealInputs::default()
        };
        let m = compute(&inputs);
        assert_eq!(m.cap_rate, Decimal::ZERO);
        assert_eq!(m.one_percent_rule, Decimal::ZERO);
        assert_eq!(m.mortgage_payment, Decimal::ZERO);
    }

    #[test]
    fn test_zero_interest_rate_amortises_linearly() {
        let inputs = DealInputs {
            interest_rate: Decimal::ZERO,
            ..DealInputs::default()
        };
        // 144000 / 360
        assert_eq!(compute(&inputs).mortgage_payment, dec!(400));
    }

    #[test]
    fn test_noi_excludes_debt_service() {
        let cheap = compute(&DealInputs {
            interest_rate: dec!(1),
            ..DealInputs::default()
        });
        let dear = compute(&DealInputs {
            interest_rate: dec!(9),
            down_payment_percentage: dec!(5),
            ..DealInputs::default()
        });
        assert_eq!(cheap.noi, dear.noi);
        assert!(dear.net_cfpu < cheap.net_cfpu);
    }

    #[test]
    fn test_out_of_range_amounts_do_not_panic() {
        let all_cash = compute(&DealInputs {
            purchase_price: dec!(1000000000000000000000000000),
            down_payment_percentage: dec!(100),
            ..DealInputs::default()
        });
        assert_eq!(all_cash.mortgage_payment, Decimal::ZERO);
        // 1e27 down + 2% closing + 10000 repairs
        assert_eq!(
            all_cash.total_cash_needed,
            dec!(1020000000000000000000010000)
        );

        let rent = compute(&DealInputs {
            monthly_rent: dec!(7000000000000000000000000000),
            ..DealInputs::default()
        });
        // 12 months of rent is past Decimal::MAX
        assert!(rent.noi > dec!(60000000000000000000000000000));
        assert!(rent.net_cfpu > Decimal::ZERO);
        assert!(rent.cap_rate > Decimal::ZERO);
    }
}
