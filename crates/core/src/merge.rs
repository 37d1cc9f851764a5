//! Recursive union merge for JSON values.
//!
//! Matching scalar keys combine into lists instead of overwriting, and
//! arrays concatenate. This is the policy used when structured errors are
//! folded into a payload and when resource side-channels are combined.

use serde_json::Value;

/// Merge `b` into `a`, recursively.
///
/// - object + object: keys union, shared keys merge recursively
/// - array + array: concatenation
/// - anything else: both values collected into a list (`1` + `2` → `[1, 2]`)
///
/// `Null` on either side yields the other value unchanged.
pub fn merge_recursive(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Null, b) => b,
        (a, Value::Null) => a,
        (Value::Object(mut a), Value::Object(b)) => {
            for (key, vb) in b {
                let merged = match a.remove(&key) {
                    Some(va) => merge_recursive(va, vb),
                    None => vb,
                };
                a.insert(key, merged);
            }
            Value::Object(a)
        }
        (Value::Array(mut a), Value::Array(b)) => {
            a.extend(b);
            Value::Array(a)
        }
        (Value::Array(mut a), b) => {
            a.push(b);
            Value::Array(a)
        }
        (a, Value::Array(b)) => {
            let mut list = vec![a];
            list.extend(b);
            Value::Array(list)
        }
        (a, b) => Value::Array(vec![a, b]),
    }
}
