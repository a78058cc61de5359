pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print JSON to stdout.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Flatten nested objects into dotted `(path, leaf)` pairs.
/// Arrays are kept as leaves.
pub fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, val, out);
            }
        }
        _ => out.push((prefix.to_string(), value.clone())),
    }
}

/// Render a scalar for human output. Decimal strings are rounded to 2 places.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(d) => d.round_dp(2).normalize().to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_scalar).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested() {
        let mut out = Vec::new();
        flatten("", &json!({"metrics": {"noi": "18468"}, "price_per_unit": "45000"}), &mut out);
        let keys: Vec<&str> = out.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["metrics.noi", "price_per_unit"]);
    }

    #[test]
    fn test_format_scalar_rounds_decimals() {
        assert_eq!(format_scalar(&json!("626.6970994642")), "626.7");
        assert_eq!(format_scalar(&json!("49600.0")), "49600");
        assert_eq!(format_scalar(&json!("favorable")), "favorable");
        assert_eq!(format_scalar(&json!(360)), "360");
    }
}
