use serde_json::Value;

use super::scalar;

/// Headline value per analysis, as JSON pointers into the result object.
/// The first one present and non-null wins.
const HEADLINE_POINTERS: [&str; 10] = [
    "/recommendation/fee",
    "/recommendation/status",
    "/ecosystem_value",
    "/farmerpay/value/net_value_add",
    "/current/net_profit",
    "/financials/net_profit",
    "/cumulative_net_profit",
    "/best_roi_scale",
    "/loss_threshold",
    "/rows/1/cumulative_net_profit",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    println!("{}", headline(result));
}

fn headline(result: &Value) -> String {
    if let Some(val) = HEADLINE_POINTERS
        .iter()
        .filter_map(|p| result.pointer(p))
        .find(|v| !v.is_null())
    {
        return scalar(val);
    }
    match result {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{key}: {}", scalar(val)))
            .unwrap_or_default(),
        other => scalar(other),
    }
}
