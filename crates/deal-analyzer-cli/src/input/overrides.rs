use serde_json::{Map, Value};

/// Parse a `field=value` override. The value is read as a JSON scalar
/// (`250000`, `4.5`, `false`) and falls back to a plain string.
pub fn parse_override(spec: &str) -> Result<(String, Value), Box<dyn std::error::Error>> {
    let (key, raw) = spec
        .split_once('=')
        .ok_or_else(|| format!("Override must be field=value, got '{spec}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Override has an empty field name: '{spec}'").into());
    }
    let raw = raw.trim();
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::String(_) | Value::Null)) => v,
        _ => Value::String(raw.to_string()),
    };
    Ok((key.to_string(), value))
}

/// Apply overrides to a document, rejecting keys outside `known`.
pub fn apply_overrides(
    doc: &mut Map<String, Value>,
    overrides: &[String],
    known: &Map<String, Value>,
) -> Result<(), Box<dyn std::error::Error>> {
    for spec in overrides {
        let (key, value) = parse_override(spec)?;
        if !known.contains_key(&key) {
            return Err(format!("Unknown deal field '{key}'").into());
        }
        doc.insert(key, value);
    }
    Ok(())
}
