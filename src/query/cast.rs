//! Typed casting of raw query-parameter strings.

use serde_json::Value;

/// Casts a raw query-parameter string to its typed value.
///
/// - `""` → `None` (an empty value means absent, not empty string)
/// - `"true"` / `"false"` → boolean
/// - `"null"` / `"undefined"` → null
/// - integers and floats → number
/// - JSON objects and arrays → parsed structure
/// - anything else → string
///
/// # Example
/// ```
/// use serde_json::json;
/// use hookset::cast_value;
///
/// assert_eq!(cast_value("true"), Some(json!(true)));
/// assert_eq!(cast_value("42"), Some(json!(42)));
/// assert_eq!(cast_value(r#"{"a":1}"#), Some(json!({"a": 1})));
/// assert_eq!(cast_value("plain"), Some(json!("plain")));
/// assert_eq!(cast_value(""), None);
/// ```
pub fn cast_value(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    match raw {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        "null" | "undefined" => return Some(Value::Null),
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Value::Number(n.into()));
    }
    if let Ok(n) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Some(Value::Number(n));
        }
    }
    if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
        if parsed.is_object() || parsed.is_array() {
            return Some(parsed);
        }
    }
    Some(Value::String(raw.to_string()))
}

/// Renders a typed value back to its raw query-parameter string.
///
/// Strings render bare (no JSON quoting); everything else renders as compact
/// JSON, so [`cast_value`] recovers it.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_casts() {
        assert_eq!(cast_value("true"), Some(json!(true)));
        assert_eq!(cast_value("false"), Some(json!(false)));
        assert_eq!(cast_value("null"), Some(Value::Null));
        assert_eq!(cast_value("undefined"), Some(Value::Null));
        assert_eq!(cast_value("42"), Some(json!(42)));
        assert_eq!(cast_value("-7"), Some(json!(-7)));
        assert_eq!(cast_value("3.25"), Some(json!(3.25)));
        assert_eq!(cast_value("hello"), Some(json!("hello")));
    }

    #[test]
    fn empty_value_is_absent() {
        assert_eq!(cast_value(""), None);
    }

    #[test]
    fn structures_parse_and_scalars_stay_raw() {
        assert_eq!(cast_value(r#"{"a":1,"b":[2]}"#), Some(json!({"a": 1, "b": [2]})));
        assert_eq!(cast_value("[1,2,3]"), Some(json!([1, 2, 3])));
        // A JSON-quoted string is not unwrapped; it round-trips as raw text.
        assert_eq!(cast_value(r#""quoted""#), Some(json!(r#""quoted""#)));
    }

    #[test]
    fn render_is_the_inverse_of_cast() {
        for value in [
            json!("plain"),
            json!(true),
            json!(42),
            json!(3.25),
            json!({"a": 1}),
            json!([1, 2]),
        ] {
            let raw = render_value(&value);
            assert_eq!(cast_value(&raw), Some(value));
        }
    }
}
