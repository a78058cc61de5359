use serde_json::Value;
use std::io;

use super::flatten;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = match value {
        Value::Object(map) => map.get("result").unwrap_or(value),
        _ => value,
    };

    match body {
        Value::Object(result) => match result.get("results") {
            // Sensitivity sweep rows
            Some(Value::Array(rows)) => write_array_csv(&mut wtr, rows),
            _ => {
                let mut fields = Vec::new();
                flatten("", body, &mut fields);
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in &fields {
                    let _ = wtr.write_record([key.clone(), format_csv_value(val)]);
                }
            }
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(body)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

/// Full precision: CSV is for downstream tools, not eyes.
fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
