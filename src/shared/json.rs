//! JSON-safe rendering of 64-bit integers
//!
//! Identifiers are stored as `BIGINT`. JavaScript clients parse JSON numbers
//! as IEEE-754 doubles, so any integer beyond `2^53 - 1` in magnitude is
//! rewritten as its decimal string before a response leaves the server.

use serde_json::Value;

/// Largest integer a double represents exactly (`Number.MAX_SAFE_INTEGER`).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Recursively replace unsafe integers with strings.
///
/// Objects and arrays are walked, every other value (strings, dates already
/// rendered as strings, floats, booleans, null) passes through unchanged.
pub fn stringify_unsafe_integers(value: Value) -> Value {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                if n.unsigned_abs() > MAX_SAFE_INTEGER {
                    return Value::String(n.to_string());
                }
            } else if let Some(n) = number.as_u64() {
                if n > MAX_SAFE_INTEGER {
                    return Value::String(n.to_string());
                }
            }
            Value::Number(number)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(stringify_unsafe_integers).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, stringify_unsafe_integers(value)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contains_unsafe_number(value: &Value) -> bool {
        match value {
            Value::Number(n) => {
                n.as_i64().is_some_and(|i| i.unsigned_abs() > MAX_SAFE_INTEGER)
                    || n.as_u64().is_some_and(|u| u > MAX_SAFE_INTEGER)
            }
            Value::Array(items) => items.iter().any(contains_unsafe_number),
            Value::Object(map) => map.values().any(contains_unsafe_number),
            _ => false,
        }
    }

    #[test]
    fn safe_integers_are_untouched() {
        let value = json!({"id": 42, "max": MAX_SAFE_INTEGER, "neg": -17});
        assert_eq!(stringify_unsafe_integers(value.clone()), value);
    }

    #[test]
    fn nested_identifier_three_levels_deep_is_stringified() {
        let big = 9_223_372_036_854_775_807i64;
        let value = json!({
            "data": {
                "items": [
                    {"id": 1, "student": {"id": big, "name": "Ana"}},
                    {"id": 2, "student": {"id": 3, "name": "Rui"}}
                ]
            }
        });

        let out = stringify_unsafe_integers(value);

        assert_eq!(
            out["data"]["items"][0]["student"]["id"],
            json!("9223372036854775807")
        );
        assert_eq!(out["data"]["items"][1]["student"]["id"], json!(3));
        assert!(!contains_unsafe_number(&out));
    }

    #[test]
    fn large_unsigned_and_negative_values_are_stringified() {
        let out = stringify_unsafe_integers(json!([u64::MAX, -9_007_199_254_740_993i64]));
        assert_eq!(out, json!(["18446744073709551615", "-9007199254740993"]));
    }

    #[test]
    fn other_scalars_pass_through() {
        let value = json!({
            "grade": 14.5,
            "paid": true,
            "note": null,
            "dueDate": "2024-03-01",
            "at": "2024-03-01T10:00:00Z"
        });
        assert_eq!(stringify_unsafe_integers(value.clone()), value);
    }
}
