use serde_json::Value;

use super::format_scalar;

/// Key figures, in priority order, for a deal or sweep result.
const PRIORITY_KEYS: [&str; 5] = ["cash_on_cash", "cap_rate", "net_cfpu", "noi", "base_case_value"];

/// Print just the key answer value from the output.
///
/// Looks for the priority keys in `result.metrics`, `result.base_metrics`,
/// then `result` itself, falling back to the first field of the result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let scopes = [
        result_obj.get("metrics"),
        result_obj.get("base_metrics"),
        Some(result_obj),
    ];
    for scope in scopes.into_iter().flatten() {
        if let Value::Object(map) = scope {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key) {
                    if !val.is_null() {
                        println!("{}", format_scalar(val));
                        return;
                    }
                }
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result_obj));
}
