use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::deal_analysis::inputs::{DealField, DealInputs};
use crate::deal_analysis::model::{compute, DealMetrics};
use crate::error::DealAnalyzerError;
use crate::types::*;
use crate::DealAnalyzerResult;

/// Upper bound on sweep points per variable.
const MAX_SWEEP_POINTS: usize = 1000;

/// A deal input swept across a range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealSensitivityVariable {
    pub field: DealField,
    #[serde(flatten)]
    pub range: SweepRange,
}

/// Metric reported in a 2-way grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealMetric {
    MonthlyIncome,
    MonthlyExpenses,
    TotalCashNeeded,
    Noi,
    NetCfpu,
    CashOnCash,
    CapRate,
    OnePercentRule,
    MortgagePayment,
    MortgageInsurance,
}

impl DealMetric {
    pub fn read(self, metrics: &DealMetrics) -> Decimal {
        match self {
            DealMetric::MonthlyIncome => metrics.monthly_income,
            DealMetric::MonthlyExpenses => metrics.monthly_expenses,
            DealMetric::TotalCashNeeded => metrics.total_cash_needed,
            DealMetric::Noi => metrics.noi,
            DealMetric::NetCfpu => metrics.net_cfpu,
            DealMetric::CashOnCash => metrics.cash_on_cash,
            DealMetric::CapRate => metrics.cap_rate,
            DealMetric::OnePercentRule => metrics.one_percent_rule,
            DealMetric::MortgagePayment => metrics.mortgage_payment,
            DealMetric::MortgageInsurance => metrics.mortgage_insurance,
        }
    }
}

/// Input for a 1-way sweep over a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealSensitivityInput {
    #[serde(default)]
    pub base_inputs: DealInputs,
    pub variable: DealSensitivityVariable,
}

/// One evaluated point of a 1-way sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealSensitivityRow {
    pub value: Decimal,
    pub monthly_expenses: Decimal,
    pub mortgage_payment: Decimal,
    pub net_cfpu: Decimal,
    pub noi: Decimal,
    pub cash_on_cash: Decimal,
    pub cap_rate: Decimal,
}

/// Output of a 1-way sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealSensitivityOutput {
    pub field: DealField,
    pub base_value: Decimal,
    pub base_metrics: DealMetrics,
    pub results: Vec<DealSensitivityRow>,
}

/// Input for a 2-way grid over a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealGridInput {
    #[serde(default)]
    pub base_inputs: DealInputs,
    pub variable_1: DealSensitivityVariable,
    pub variable_2: DealSensitivityVariable,
    pub output_metric: DealMetric,
}

/// Output of a 2-way grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealGridOutput {
    pub variable_1: DealField,
    pub variable_2: DealField,
    pub variable_1_values: Vec<Decimal>,
    pub variable_2_values: Vec<Decimal>,
    pub output_metric: DealMetric,
    /// Matrix[i][j] = metric when variable_1 = values_1[i], variable_2 = values_2[j]
    pub matrix: Vec<Vec<Decimal>>,
    /// Metric at the unmodified base inputs
    pub base_case_value: Decimal,
}

/// Generate the sweep values for a variable from min to max with step.
fn generate_sweep_values(var: &DealSensitivityVariable) -> DealAnalyzerResult<Vec<Decimal>> {
    let SweepRange { min, max, step } = var.range;
    if step <= Decimal::ZERO {
        return Err(DealAnalyzerError::InvalidInput {
            field: format!("variable:{}", var.field),
            reason: "Step must be positive".into(),
        });
    }
    if min > max {
        return Err(DealAnalyzerError::InvalidInput {
            field: format!("variable:{}", var.field),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = min;
    while current <= max {
        if values.len() == MAX_SWEEP_POINTS {
            return Err(DealAnalyzerError::InvalidInput {
                field: format!("variable:{}", var.field),
                reason: format!("Sweep exceeds {MAX_SWEEP_POINTS} points"),
            });
        }
        values.push(current);
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    // Ensure max is included if step doesn't land exactly on it
    if let Some(&last) = values.last() {
        if last < max {
            values.push(max);
        }
    }

    Ok(values)
}

fn midpoint(range: &SweepRange) -> Decimal {
    range.min / dec!(2) + range.max / dec!(2)
}

/// Sweep one deal input and recompute the deal at every point.
///
/// Points an integer field cannot hold (fractions) are skipped with a warning.
pub fn deal_sensitivity(
    input: &DealSensitivityInput,
) -> DealAnalyzerResult<ComputationOutput<DealSensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let field = input.variable.field;
    let values = generate_sweep_values(&input.variable)?;

    let mut results = Vec::with_capacity(values.len());
    for value in values {
        let mut scenario = input.base_inputs.clone();
        if let Err(e) = scenario.set(field, value) {
            warnings.push(format!("Skipped {field} = {value}: {e}"));
            continue;
        }
        let m = compute(&scenario);
        results.push(DealSensitivityRow {
            value,
            monthly_expenses: m.monthly_expenses,
            mortgage_payment: m.mortgage_payment,
            net_cfpu: m.net_cfpu,
            noi: m.noi,
            cash_on_cash: m.cash_on_cash,
            cap_rate: m.cap_rate,
        });
    }

    if results.is_empty() {
        return Err(DealAnalyzerError::InsufficientData(format!(
            "No valid sweep points for {field}"
        )));
    }

    let output = DealSensitivityOutput {
        field,
        base_value: input.base_inputs.get(field),
        base_metrics: compute(&input.base_inputs),
        results,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "1-Way Deal Sensitivity Analysis",
        &serde_json::json!({
            "field": field,
            "min": input.variable.range.min,
            "max": input.variable.range.max,
            "step": input.variable.range.step,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Evaluate one metric over a 2-way grid of deal inputs.
pub fn deal_sensitivity_grid(
    input: &DealGridInput,
) -> DealAnalyzerResult<ComputationOutput<DealGridOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.variable_1.field == input.variable_2.field {
        return Err(DealAnalyzerError::InvalidInput {
            field: "variable_2".into(),
            reason: "Grid variables must be different fields".into(),
        });
    }

    let f1 = input.variable_1.field;
    let f2 = input.variable_2.field;
    let v1_values = generate_sweep_values(&input.variable_1)?;
    let v2_values = generate_sweep_values(&input.variable_2)?;

    let mut matrix = Vec::with_capacity(v1_values.len());
    for v1 in &v1_values {
        let mut row = Vec::with_capacity(v2_values.len());
        for v2 in &v2_values {
            let mut scenario = input.base_inputs.clone();
            let applied = scenario
                .set(f1, *v1)
                .and_then(|_| scenario.set(f2, *v2));
            match applied {
                Ok(()) => row.push(input.output_metric.read(&compute(&scenario))),
                Err(e) => {
                    warnings.push(format!("Evaluation failed at ({v1}, {v2}): {e}"));
                    row.push(Decimal::ZERO);
                }
            }
        }
        matrix.push(row);
    }

    let base_case_value = input.output_metric.read(&compute(&input.base_inputs));

    let output = DealGridOutput {
        variable_1: f1,
        variable_2: f2,
        variable_1_values: v1_values,
        variable_2_values: v2_values,
        output_metric: input.output_metric,
        matrix,
        base_case_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "2-Way Deal Sensitivity Grid",
        &serde_json::json!({
            "variable_1": f1,
            "variable_2": f2,
            "output_metric": input.output_metric,
            "midpoint_1": midpoint(&input.variable_1.range),
            "midpoint_2": midpoint(&input.variable_2.range),
        }),
        warnings,
        elapsed,
        output,
    ))
}
