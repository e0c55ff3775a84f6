//! JSON field lookup and lenient value conversion.
//!
//! Flow exports disagree on field names ("src_ip" vs "source") and on
//! types (numbers serialized as strings). These helpers absorb both.

use serde_json::Value;

/// First present, non-null field among `names`.
pub fn lookup_field<'a>(object: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|v| !v.is_null())
}

/// Convert a JSON value to a non-empty trimmed string.
pub fn value_to_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Convert a JSON value to a float if possible.
pub fn value_to_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Convert a JSON value to an integer if possible.
pub fn value_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Convert a JSON value to a byte count.
///
/// Fractions are truncated and negatives clamp to zero. Returns `None` for
/// values that are not numeric at all.
pub fn value_to_bytes(value: &Value) -> Option<u64> {
    if let Value::Number(n) = value {
        if let Some(u) = n.as_u64() {
            return Some(u);
        }
    }
    value_to_float(value).map(|f| if f <= 0.0 { 0 } else { f as u64 })
}
