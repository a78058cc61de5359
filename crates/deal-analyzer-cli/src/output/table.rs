use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_field_table(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    // Sweep rows and grids get their own layout
    match result.get("results") {
        Some(Value::Array(rows)) => print_array_table(rows),
        _ => match (result.get("matrix"), result.get("variable_1_values")) {
            (Some(Value::Array(matrix)), Some(Value::Array(row_values))) => {
                print_grid_table(result, matrix, row_values)
            }
            _ => print_field_table(result),
        },
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column table of every leaf field, nested objects as dotted paths.
fn print_field_table(value: &Value) {
    let mut fields = Vec::new();
    flatten("", value, &mut fields);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in &fields {
        builder.push_record([key.clone(), paint_signal(key, format_scalar(val))]);
    }
    println!("{}", Table::from(builder));
}

fn print_grid_table(result: &Value, matrix: &[Value], row_values: &[Value]) {
    let corner = format!(
        "{} \\ {}",
        format_scalar(result.get("variable_1").unwrap_or(&Value::Null)),
        format_scalar(result.get("variable_2").unwrap_or(&Value::Null)),
    );
    let mut header = vec![corner];
    if let Some(Value::Array(cols)) = result.get("variable_2_values") {
        header.extend(cols.iter().map(format_scalar));
    }

    let mut builder = Builder::default();
    builder.push_record(header);
    for (row_value, row) in row_values.iter().zip(matrix) {
        let mut record = vec![format_scalar(row_value)];
        if let Value::Array(cells) = row {
            record.extend(cells.iter().map(format_scalar));
        }
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));

    if let Some(metric) = result.get("output_metric") {
        println!("\nMetric: {}", format_scalar(metric));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_scalar).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_scalar(item));
        }
    }
}

/// Colour `signals.*` verdicts: favourable green, caution yellow, unfavourable red.
fn paint_signal(key: &str, text: String) -> String {
    if !key.starts_with("signals.") {
        return text;
    }
    match text.as_str() {
        "favorable" => text.green().to_string(),
        "caution" => text.yellow().to_string(),
        "unfavorable" => text.red().to_string(),
        _ => text,
    }
}
