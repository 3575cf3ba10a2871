//! Response normalizer
//!
//! The prediction service has no fixed reply format: the body can be plain text, a
//! JSON primitive, or a JSON object carrying the label under `prediction`,
//! `result` or `data`. `normalize` reduces all of these to one display string
//! and never fails.

use serde_json::{Map, Number, Value};

/// Label fields, in precedence order
const LABEL_FIELDS: [&str; 3] = ["prediction", "result", "data"];

/// Shape of a response body after parsing
#[derive(Debug, Clone, PartialEq)]
enum Payload {
    /// Not JSON, or a JSON document with no fields to inspect
    Text(String),
    Number(Number),
    Object(Map<String, Value>),
    /// Strings, booleans and arrays
    Other(Value),
}

impl Payload {
    fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Payload::Object(map),
            Ok(Value::Number(n)) => Payload::Number(n),
            // `null` has no fields to look up; the raw text stands in
            Ok(Value::Null) | Err(_) => Payload::Text(raw.to_string()),
            Ok(other) => Payload::Other(other),
        }
    }

    /// Pick the value to display
    fn candidate(self) -> Value {
        match self {
            Payload::Text(text) => Value::String(text),
            Payload::Number(n) => Value::Number(n),
            Payload::Other(value) => value,
            Payload::Object(map) => {
                // First truthy field wins; a present but falsy field is skipped
                let key = LABEL_FIELDS
                    .iter()
                    .find(|key| map.get(**key).is_some_and(is_truthy));
                match key {
                    Some(key) => map.get(*key).cloned().unwrap_or(Value::Null),
                    None => Value::Object(map),
                }
            }
        }
    }
}

/// Reduce a raw response body to a display string.
///
/// Quote characters are stripped and surrounding whitespace trimmed, so
/// `"\"Common\""`, `{"prediction":"Common"}` and `Common` all yield `Common`.
pub fn normalize(raw: &str) -> String {
    let candidate = Payload::parse(raw).candidate();
    let text = stringify(&candidate);

    text.chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .trim()
        .to_string()
}

/// JavaScript-style truthiness over JSON values
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => to_js_json(value),
    }
}

/// Compact JSON as `JSON.stringify` writes it: numbers through
/// `number_to_string`, integer-like keys first in ascending order, then the
/// rest in document order
fn to_js_json(value: &Value) -> String {
    match value {
        Value::Number(n) => number_to_string(n),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(to_js_json).collect();
            format!("[{}]", parts.join(","))
        }
        Value::Object(map) => {
            let parts: Vec<String> = js_key_order(map)
                .into_iter()
                .map(|(key, v)| format!("{}:{}", Value::String(key.clone()), to_js_json(v)))
                .collect();
            format!("{{{}}}", parts.join(","))
        }
        // null, booleans, escaped strings
        other => other.to_string(),
    }
}

fn js_key_order(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let (mut ordered, named): (Vec<_>, Vec<_>) =
        map.iter().partition(|(key, _)| array_index(key).is_some());
    ordered.sort_by_key(|(key, _)| array_index(key));
    ordered.extend(named);
    ordered
}

/// Canonical array index: `0`, or digits without a leading zero below 2^32 - 1
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|i| *i != u32::MAX)
}

/// Integral floats print without a fraction (`3.0` -> `3`)
fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_field() {
        let body = serde_json::json!({"prediction": "Legendary"}).to_string();
        assert_eq!(normalize(&body), "Legendary");
    }

    #[test]
    fn test_precedence_skips_falsy_fields() {
        assert_eq!(normalize(r#"{"prediction": "", "result": "Rare"}"#), "Rare");
        assert_eq!(normalize(r#"{"prediction": 0, "data": "Common"}"#), "Common");
        assert_eq!(
            normalize(r#"{"prediction": null, "result": false, "data": "Mythical"}"#),
            "Mythical"
        );
    }

    #[test]
    fn test_precedence_order() {
        assert_eq!(
            normalize(r#"{"data": "C", "result": "B", "prediction": "A"}"#),
            "A"
        );
        assert_eq!(normalize(r#"{"data": "C", "result": "B"}"#), "B");
        assert_eq!(normalize(r#"{"data": "C"}"#), "C");
    }

    #[test]
    fn test_object_fallback() {
        assert_eq!(normalize(r#"{"foo": "bar"}"#), "{foo:bar}");
    }

    #[test]
    fn test_object_fallback_when_all_fields_falsy() {
        assert_eq!(
            normalize(r#"{"prediction": "", "result": 0}"#),
            "{prediction:,result:0}"
        );
    }

    #[test]
    fn test_object_fallback_keeps_key_order() {
        assert_eq!(normalize(r#"{"z": 1, "a": 2}"#), "{z:1,a:2}");
    }

    #[test]
    fn test_object_fallback_integral_floats() {
        assert_eq!(normalize(r#"{"foo": 3.0}"#), "{foo:3}");
        assert_eq!(normalize(r#"{"prediction": {"score": 1.0}}"#), "{score:1}");
        assert_eq!(normalize("[1.0, 2.5, -4.0]"), "[1,2.5,-4]");
    }

    #[test]
    fn test_object_fallback_integer_keys_first() {
        assert_eq!(normalize(r#"{"z": 1, "2": 2}"#), "{2:2,z:1}");
        assert_eq!(
            normalize(r#"{"b": 1, "10": 2, "1": 3, "01": 4}"#),
            "{1:3,10:2,b:1,01:4}"
        );
    }

    #[test]
    fn test_object_fallback_reescapes_strings() {
        assert_eq!(normalize(r#"{"label": "Rare\nMon"}"#), r"{label:Rare\nMon}");
    }

    #[test]
    fn test_nested_object_is_serialized() {
        assert_eq!(
            normalize(r#"{"prediction": {"label": "Legendary", "score": 0.93}}"#),
            "{label:Legendary,score:0.93}"
        );
    }

    #[test]
    fn test_empty_array_field_is_truthy() {
        assert_eq!(normalize(r#"{"prediction": [], "result": "Rare"}"#), "[]");
    }

    #[test]
    fn test_json_string_quotes_removed() {
        assert_eq!(normalize(r#""Common""#), "Common");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(normalize("Mythical"), "Mythical");
        assert_eq!(normalize("  Mythical \n"), "Mythical");
    }

    #[test]
    fn test_plain_text_quotes_stripped() {
        assert_eq!(normalize(r#"it's "Rare""#), "its Rare");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(normalize("1"), "1");
        assert_eq!(normalize("3.0"), "3");
        assert_eq!(normalize("0.25"), "0.25");
        assert_eq!(normalize(r#"{"prediction": 2}"#), "2");
    }

    #[test]
    fn test_booleans() {
        assert_eq!(normalize("true"), "true");
        assert_eq!(normalize(r#"{"prediction": true}"#), "true");
    }

    #[test]
    fn test_total_on_odd_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("null"), "null");
        assert_eq!(normalize("{not json"), "{not json");
        assert_eq!(normalize(r#"["Common", "Rare"]"#), "[Common,Rare]");
        assert_eq!(normalize("[]"), "[]");
        assert_eq!(normalize("{}"), "{}");

        let deep = format!("{}{}", "[".repeat(64), "]".repeat(64));
        assert_eq!(normalize(&deep), deep);
    }

    #[test]
    fn test_deeply_nested_beyond_parser_limit_falls_back_to_text() {
        // serde_json rejects nesting past its recursion limit; the raw text is used
        let deep = format!("{}{}", "[".repeat(1000), "]".repeat(1000));
        assert_eq!(normalize(&deep), deep);
    }

    #[test]
    fn test_label_is_trimmed() {
        assert_eq!(normalize(r#"{"result": "  Very Rare  "}"#), "Very Rare");
    }
}
