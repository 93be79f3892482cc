//! String-to-JSON coercion guided by a field's current JSON shape.
//!
//! Key-value providers carry strings; the settings instance's serialized
//! form tells us what shape each field expects, so the raw string is parsed
//! toward that shape. A value that fails to parse stays a string and the
//! subsequent typed deserialization reports the mismatch.

use serde_json::Value;

/// Human-readable name of a JSON value's type, used in coercion diagnostics.
pub(crate) fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interpret `raw` against the shape of the field's current value.
pub(crate) fn coerce(raw: &str, shape: &Value) -> Value {
    match shape {
        Value::Bool(_) => parse_bool(raw).map_or_else(|| Value::String(raw.to_owned()), Value::Bool),
        Value::Number(_) => serde_json::from_str::<serde_json::Number>(raw.trim())
            .map_or_else(|_| Value::String(raw.to_owned()), Value::Number),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
        }
        Value::String(_) => Value::String(raw.to_owned()),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{coerce, shape_name};

    #[rstest]
    #[case::number(json!(0), "42", json!(42))]
    #[case::float(json!(0.5), "1.5", json!(1.5))]
    #[case::bool_true(json!(false), "True", json!(true))]
    #[case::bool_false(json!(true), "false", json!(false))]
    #[case::string_stays_string(json!(""), "42", json!("42"))]
    #[case::array_parses(json!([]), "[1,2]", json!([1, 2]))]
    #[case::null_parses_freely(json!(null), "7", json!(7))]
    #[case::unparseable_number_stays_string(json!(0), "seven", json!("seven"))]
    fn coerces_toward_the_field_shape(
        #[case] shape: Value,
        #[case] raw: &str,
        #[case] expected: Value,
    ) {
        assert_eq!(coerce(raw, &shape), expected);
    }

    #[test]
    fn shape_names_cover_all_variants() {
        assert_eq!(shape_name(&json!(null)), "null");
        assert_eq!(shape_name(&json!(true)), "boolean");
        assert_eq!(shape_name(&json!(1)), "number");
        assert_eq!(shape_name(&json!("s")), "string");
        assert_eq!(shape_name(&json!([])), "array");
        assert_eq!(shape_name(&json!({})), "object");
    }
}
