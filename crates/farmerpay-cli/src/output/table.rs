use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, scalar, series};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go in a two-column table; a row series (sweep
/// points, scenario rows, pricing tiers) gets its own wide table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => {
                print_result(result);
                print_envelope(map);
            }
            None => print_fields(value, None),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{value}"),
    }
}

fn print_result(result: &Value) {
    let series = series(result);
    print_fields(result, series.map(|(key, _)| key));
    if let Some((key, rows)) = series {
        println!("\n{key}:");
        print_rows(rows);
    }
}

fn print_fields(value: &Value, skip: Option<&str>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(value) {
        let long_array = val.as_array().is_some_and(|a| a.len() > 6);
        if long_array || skip.is_some_and(|s| key == s) {
            continue;
        }
        builder.push_record([key, display(&val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    let flat: Vec<Vec<(String, Value)>> = rows.iter().map(flatten).collect();
    let headers: Vec<String> = flat
        .first()
        .map(|r| r.iter().map(|(k, _)| k.clone()).collect())
        .unwrap_or_default();
    if headers.is_empty() {
        for row in rows {
            println!("{}", display(row));
        }
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in &flat {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| display(v))
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(display).collect::<Vec<_>>().join(", "),
        other => scalar(other),
    }
}
