use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::DealAnalyzerError;
use crate::math::{safe_div, HUNDRED};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::DealAnalyzerResult;

use super::inputs::{DealField, DealInputs};
use super::model::{compute_with_breakdown, pmi_applies, DealBreakdown, DealMetrics};
use super::signals::DealSignals;

/// Largest amount accepted for any money field.
const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);
const HIGH_VACANCY: Decimal = dec!(15);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Complete deal screening output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealAnalysis {
    pub metrics: DealMetrics,
    pub breakdown: DealBreakdown,
    pub signals: DealSignals,
    /// Purchase price per unit (0 when the unit count is 0)
    pub price_per_unit: Money,
    /// Monthly income per unit (0 when the unit count is 0)
    pub rent_per_unit: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Screen a rental property acquisition.
///
/// Rejects inputs that cannot describe a real deal (negative values, amounts
/// above `1e15`, percentages above `100`), then derives the full metric set
/// and flags anything a reviewer should look at twice.
pub fn analyze_deal(input: &DealInputs) -> DealAnalyzerResult<ComputationOutput<DealAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let (metrics, breakdown) = compute_with_breakdown(input);
    let signals = DealSignals::from_metrics(&metrics);

    let units = Decimal::from(input.num_units);
    let price_per_unit = safe_div(input.purchase_price, units);
    let rent_per_unit = safe_div(metrics.monthly_income, units);

    collect_warnings(input, &metrics, &breakdown, &mut warnings);

    let output = DealAnalysis {
        metrics,
        breakdown,
        signals,
        price_per_unit,
        rent_per_unit,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    debug!(
        address = %input.address,
        warnings = warnings.len(),
        elapsed_us = elapsed,
        "deal analysed"
    );

    Ok(with_metadata(
        "Rental Property Deal Analysis (Cash Flow, Cap Rate, Cash-on-Cash)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &DealInputs) -> DealAnalyzerResult<()> {
    for field in DealField::ALL {
        if field.is_integer() {
            continue;
        }
        let value = input.get(field);
        if value < Decimal::ZERO {
            return Err(DealAnalyzerError::InvalidInput {
                field: field.to_string(),
                reason: "Must not be negative".into(),
            });
        }
        if field.is_percentage() {
            if value > HUNDRED {
                return Err(DealAnalyzerError::InvalidInput {
                    field: field.to_string(),
                    reason: "Cannot exceed 100%".into(),
                });
            }
        } else if value > MAX_AMOUNT {
            return Err(DealAnalyzerError::InvalidInput {
                field: field.to_string(),
                reason: format!("Cannot exceed {MAX_AMOUNT}"),
            });
        }
    }

    Ok(())
}

fn collect_warnings(
    input: &DealInputs,
    metrics: &DealMetrics,
    breakdown: &DealBreakdown,
    warnings: &mut Vec<String>,
) {
    if pmi_applies(input) {
        warnings.push(format!(
            "Down payment of {}% is below 20% — PMI of {:.2}/mo added",
            input.down_payment_percentage, metrics.mortgage_insurance
        ));
    }

    if breakdown.loan_amount > Decimal::ZERO {
        if input.mortgage_length == 0 {
            warnings.push(
                "Mortgage length is 0 years — loan carries no debt service in this model".into(),
            );
        } else if input.interest_rate.is_zero() {
            warnings.push("Interest rate is 0% — loan amortised in a straight line".into());
        }
    }

    if metrics.net_cfpu < Decimal::ZERO {
        warnings.push(format!(
            "Negative monthly cash flow of {:.2}",
            metrics.net_cfpu
        ));
    }

    if input.purchase_price > Decimal::ZERO && metrics.one_percent_rule < Decimal::ONE {
        warnings.push(format!(
            "Monthly income is {:.2}% of purchase price — fails the 1% rule",
            metrics.one_percent_rule
        ));
    }

    if input.vacancy > HIGH_VACANCY {
        warnings.push(format!(
            "Vacancy allowance of {}% exceeds 15% — above typical market norms",
            input.vacancy
        ));
    }

    if input.arv > Decimal::ZERO && input.arv < input.purchase_price + input.repair_costs {
        warnings.push(format!(
            "ARV of {} is below purchase price plus repairs ({})",
            input.arv,
            input.purchase_price + input.repair_costs
        ));
    }
}
