pub mod file;
pub mod overrides;
pub mod stdin;

use deal_analyzer_core::deal_analysis::DealInputs;
use serde_json::{Map, Value};

/// Resolve deal inputs: `--input` file, else piped stdin, else seed defaults,
/// with `--set` overrides applied last.
pub fn load_deal_inputs(
    path: Option<&str>,
    overrides: &[String],
) -> Result<DealInputs, Box<dyn std::error::Error>> {
    let mut doc = match path {
        Some(p) => file::read_document(p)?,
        None => stdin::read_document()?.unwrap_or_default(),
    };
    tracing::debug!(fields = doc.len(), overrides = overrides.len(), "loaded deal document");

    let known = match serde_json::to_value(DealInputs::default())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    overrides::apply_overrides(&mut doc, overrides, &known)?;

    Ok(serde_json::from_value(Value::Object(doc))?)
}
