pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => log::error!("could not render JSON output: {e}"),
    }
}

/// Result fields that hold the row series of sweep/projection outputs.
const SERIES_KEYS: [&str; 3] = ["points", "rows", "tiers"];

/// The row series inside a result object, if it has one.
pub fn series(result: &Value) -> Option<(&'static str, &Vec<Value>)> {
    let map = result.as_object()?;
    SERIES_KEYS
        .iter()
        .find_map(|k| map.get(*k).and_then(Value::as_array).map(|arr| (*k, arr)))
        .filter(|(_, arr)| !arr.is_empty())
}

/// Flatten nested objects into `parent.child` keys. Arrays stay as values.
pub fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    if let Value::Object(map) = value {
        flatten_into(&mut out, "", map);
    }
    out
}

fn flatten_into(out: &mut Vec<(String, Value)>, prefix: &str, map: &Map<String, Value>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) if !inner.is_empty() => flatten_into(out, &name, inner),
            other => out.push((name, other.clone())),
        }
    }
}

/// Scalar rendering shared by every text formatter.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
