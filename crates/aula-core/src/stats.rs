//! Statistic shaping shared by every dashboard page.
//!
//! Stats endpoints are loose about types: counts may arrive as numbers,
//! numeric strings, or be missing entirely. Pages read them through these
//! helpers so a malformed field renders as `0` rather than failing the page.

use serde_json::Value;

/// Coerces a JSON value into a finite number, defaulting to 0.
pub fn safe_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Reads `field` from a stats object as a number (0 when absent).
pub fn stat(stats: &Value, field: &str) -> f64 {
    stats.get(field).map(safe_number).unwrap_or(0.0)
}

/// Share of `part` in `total` as a percentage rounded to one decimal.
///
/// Returns 0 when `total` is not positive.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total <= 0.0 || !part.is_finite() || !total.is_finite() {
        return 0.0;
    }
    ((part / total) * 1000.0).round() / 10.0
}

/// Formats a percentage for display, dropping a trailing `.0`.
pub fn format_percentage(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}%", rounded as i64)
    } else {
        format!("{rounded:.1}%")
    }
}
