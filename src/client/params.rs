//! Query-string encoding.
//!
//! Page params travel as JSON objects (they double as cache key segments)
//! and are flattened into `name=value` pairs only when a request is sent.

use serde_json::Value;

/// Flattens a params object into query pairs.
///
/// - `null` members and empty strings are left out
/// - arrays repeat the name once per element
/// - nested objects are sent as JSON text
pub fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = params else {
        return Vec::new();
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (name, value) in map {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().filter_map(|v| scalar(v).map(|s| (name.clone(), s))));
            }
            other => {
                if let Some(s) = scalar(other) {
                    pairs.push((name.clone(), s));
                }
            }
        }
    }
    pairs
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattens_scalars_and_skips_empty() {
        let mut pairs = query_pairs(&json!({
            "page": 2,
            "limit": 15,
            "search": "",
            "course": null,
            "active": true
        }));
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("active".to_string(), "true".to_string()),
                ("limit".to_string(), "15".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_arrays_repeat_the_name() {
        let pairs = query_pairs(&json!({ "status": ["pending", "approved"] }));
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|(k, _)| k == "status"));
    }

    #[test]
    fn test_non_objects_yield_nothing() {
        assert!(query_pairs(&Value::Null).is_empty());
        assert!(query_pairs(&json!([1, 2])).is_empty());
    }
}
