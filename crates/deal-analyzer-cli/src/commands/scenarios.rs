use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use deal_analyzer_core::deal_analysis::DealField;
use deal_analyzer_core::scenarios::sensitivity::{
    self, DealGridInput, DealMetric, DealSensitivityInput, DealSensitivityVariable,
};
use deal_analyzer_core::SweepRange;

use super::deal::DealSourceArgs;
use crate::input;

/// Arguments for sensitivity analysis
#[derive(Args)]
pub struct SensitivityArgs {
    /// Deal field to sweep in format field:min:max:step
    /// (e.g. "interest_rate:3:8:0.5")
    #[arg(long)]
    pub var: String,

    /// Second field to sweep (creates a 2D grid of --metric)
    #[arg(long)]
    pub var2: Option<String>,

    /// Metric reported in a 2D grid, requires --var2
    /// (e.g. cap_rate, net_cfpu; default cash_on_cash)
    #[arg(long, requires = "var2")]
    pub metric: Option<String>,

    #[command(flatten)]
    pub source: DealSourceArgs,
}

fn parse_sens_var(spec: &str) -> Result<DealSensitivityVariable, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Sensitivity variable must be field:min:max:step, got '{}'",
            spec
        )
        .into());
    }
    let field: DealField = parts[0].parse()?;
    let parse = |s: &str| -> Result<Decimal, Box<dyn std::error::Error>> {
        s.parse::<Decimal>()
            .map_err(|e| format!("Invalid number '{s}' in '{spec}': {e}").into())
    };
    Ok(DealSensitivityVariable {
        field,
        range: SweepRange {
            min: parse(parts[1])?,
            max: parse(parts[2])?,
            step: parse(parts[3])?,
        },
    })
}

fn parse_metric(name: &str) -> Result<DealMetric, Box<dyn std::error::Error>> {
    serde_json::from_value(Value::String(name.to_string()))
        .map_err(|_| format!("Unknown metric '{name}'").into())
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base_inputs =
        input::load_deal_inputs(args.source.input.as_deref(), &args.source.overrides)?;
    let variable = parse_sens_var(&args.var)?;

    match args.var2 {
        Some(ref spec) => {
            let grid = DealGridInput {
                base_inputs,
                variable_1: variable,
                variable_2: parse_sens_var(spec)?,
                output_metric: match args.metric {
                    Some(ref name) => parse_metric(name)?,
                    None => DealMetric::CashOnCash,
                },
            };
            let result = sensitivity::deal_sensitivity_grid(&grid)?;
            Ok(serde_json::to_value(result)?)
        }
        None => {
            let sweep = DealSensitivityInput {
                base_inputs,
                variable,
            };
            let result = sensitivity::deal_sensitivity(&sweep)?;
            Ok(serde_json::to_value(result)?)
        }
    }
}
