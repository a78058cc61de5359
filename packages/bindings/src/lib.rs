use napi::Result as NapiResult;
use napi_derive::napi;

use deal_analyzer_core::deal_analysis::{self, DealInputs};
use deal_analyzer_core::scenarios::sensitivity;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Deal analysis
// ---------------------------------------------------------------------------

/// Full analysis envelope: metrics, breakdown, signals, warnings.
#[napi]
pub fn analyze_deal(input_json: String) -> NapiResult<String> {
    let input: DealInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_analysis::analyze_deal(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Bare metrics, no validation. Never fails on well-formed JSON.
#[napi]
pub fn compute_deal_metrics(input_json: String) -> NapiResult<String> {
    let input: DealInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&deal_analysis::compute(&input)).map_err(to_napi_error)
}

#[napi]
pub fn default_deal_inputs() -> NapiResult<String> {
    serde_json::to_string(&DealInputs::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity
// ---------------------------------------------------------------------------

#[napi]
pub fn deal_sensitivity(input_json: String) -> NapiResult<String> {
    let input: sensitivity::DealSensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sensitivity::deal_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn deal_sensitivity_grid(input_json: String) -> NapiResult<String> {
    let input: sensitivity::DealGridInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sensitivity::deal_sensitivity_grid(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
