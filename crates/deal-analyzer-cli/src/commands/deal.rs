use clap::Args;
use serde_json::Value;

use deal_analyzer_core::deal_analysis::{self, DealInputs};

use crate::input;

/// Arguments shared by every command that takes a deal
#[derive(Args)]
pub struct DealSourceArgs {
    /// Path to JSON input file (missing fields take the seed defaults)
    #[arg(long)]
    pub input: Option<String>,

    /// Override a deal field, e.g. --set purchase_price=250000 --set pmi_enabled=false
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub overrides: Vec<String>,
}

/// Arguments for deal analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: DealSourceArgs,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal = input::load_deal_inputs(args.source.input.as_deref(), &args.source.overrides)?;
    let result = deal_analysis::analyze_deal(&deal)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_defaults() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(DealInputs::default())?)
}
