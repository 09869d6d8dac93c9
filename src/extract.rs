//! Response record extraction
//!
//! Upstream APIs disagree on response shape: some return a bare array, some
//! wrap it under a well-known key, some return a single object. `records_of`
//! normalizes all of them into a flat record list with a fixed precedence so
//! callers never need per-API configuration. `nested_value` resolves dotted
//! paths, used to locate next-cursor tokens anywhere in a response body.

use serde_json::Value;

/// Wrapper keys probed in order when the response is an object.
const RECORD_KEYS: [&str; 3] = ["data", "results", "items"];

/// Extract records from an API response.
///
/// Precedence (a fixed protocol contract):
/// 1. a top-level array is returned as-is
/// 2. an object with a `data` key yields that key's value
/// 3. else `results`, else `items`
/// 4. anything else is wrapped as a single record
pub fn records_of(response: &Value) -> Vec<Value> {
    match response {
        Value::Array(records) => records.clone(),
        Value::Object(map) => {
            for key in RECORD_KEYS {
                if let Some(found) = map.get(key) {
                    return match found {
                        Value::Array(records) => records.clone(),
                        single => vec![single.clone()],
                    };
                }
            }
            vec![response.clone()]
        }
        single => vec![single.clone()],
    }
}

/// Resolve a dotted path like `"a.b.c"` against nested objects.
///
/// Returns `None` as soon as a segment is missing or the current value is
/// not an object; a missing cursor is not an error.
pub fn nested_value<'a>(response: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = response;
    for segment in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}
