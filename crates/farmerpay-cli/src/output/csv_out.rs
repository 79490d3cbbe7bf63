use serde_json::Value;
use std::io;

use super::{flatten, scalar, series};

/// Write output as CSV to stdout.
///
/// A result with a row series is written as one row per point with dotted
/// column names; otherwise as `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let written = match (result, series(result)) {
        (_, Some((_, rows))) => write_rows(&mut wtr, rows),
        (Value::Array(rows), None) => write_rows(&mut wtr, rows),
        (other, None) => write_fields(&mut wtr, other),
    };
    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        log::error!("CSV write error: {e}");
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in flatten(value) {
        wtr.write_record([key, scalar(&val)])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let flat: Vec<Vec<(String, Value)>> = rows.iter().map(flatten).collect();
    let Some(first) = flat.first() else {
        return Ok(());
    };
    let headers: Vec<String> = first.iter().map(|(k, _)| k.clone()).collect();
    wtr.write_record(&headers)?;
    for row in &flat {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| scalar(v))
                    .unwrap_or_default()
            })
            .collect();
        wtr.write_record(&cells)?;
    }
    Ok(())
}
