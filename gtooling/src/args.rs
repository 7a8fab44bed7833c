//! JSON argument parsing helpers for tool handlers.
//!
//! Numeric parameters also accept numeric strings, since smaller models often
//! quote numbers.
//!
//! ```rust
//! use gtooling::{parse_json_object, required_f64, required_i64, required_string};
//!
//! let args = parse_json_object(r#"{"destination":"europe","weight_kg":"2.5","product_no":1001}"#)
//!     .expect("object should parse");
//! assert_eq!(required_string(&args, "destination").expect("present"), "europe");
//! assert_eq!(required_f64(&args, "weight_kg").expect("numeric string"), 2.5);
//! assert_eq!(required_i64(&args, "product_no").expect("integer"), 1001);
//! ```

use serde_json::{Map, Value};

use crate::ToolError;

pub fn parse_json_value(args_json: &str) -> Result<Value, ToolError> {
    serde_json::from_str(args_json)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid JSON arguments: {err}")))
}

/// Parses a JSON object; blank input is treated as `{}`.
pub fn parse_json_object(args_json: &str) -> Result<Map<String, Value>, ToolError> {
    if args_json.trim().is_empty() {
        return Ok(Map::new());
    }

    match parse_json_value(args_json)? {
        Value::Object(map) => Ok(map),
        _ => Err(ToolError::invalid_arguments("expected JSON object arguments")),
    }
}

pub fn required_string(args: &Map<String, Value>, key: &str) -> Result<String, ToolError> {
    match args.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        Some(_) => Err(ToolError::invalid_arguments(format!(
            "'{key}' must be a string"
        ))),
        None => Err(ToolError::invalid_arguments(format!(
            "missing required string: '{key}'"
        ))),
    }
}

pub fn required_i64(args: &Map<String, Value>, key: &str) -> Result<i64, ToolError> {
    let invalid = || ToolError::invalid_arguments(format!("'{key}' must be an integer"));

    match args.get(key) {
        Some(Value::Number(value)) => value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
                    .map(|float| float as i64)
            })
            .ok_or_else(invalid),
        Some(Value::String(value)) => value.trim().parse::<i64>().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
        None => Err(ToolError::invalid_arguments(format!(
            "missing required integer: '{key}'"
        ))),
    }
}

pub fn required_f64(args: &Map<String, Value>, key: &str) -> Result<f64, ToolError> {
    let invalid = || ToolError::invalid_arguments(format!("'{key}' must be a number"));

    match args.get(key) {
        Some(Value::Number(value)) => value.as_f64().ok_or_else(invalid),
        Some(Value::String(value)) => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(invalid),
        Some(_) => Err(invalid()),
        None => Err(ToolError::invalid_arguments(format!(
            "missing required number: '{key}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolErrorKind;

    #[test]
    fn parse_invalid_json_returns_invalid_arguments() {
        let error = parse_json_value("{").expect_err("json should fail");
        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);

        let error = parse_json_object("[1, 2]").expect_err("array is not an object");
        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
    }

    #[test]
    fn blank_arguments_parse_as_empty_object() {
        assert!(parse_json_object("  ").expect("blank is empty").is_empty());
    }

    #[test]
    fn numeric_helpers_accept_numbers_and_numeric_strings() {
        let args = parse_json_object(r#"{"a": 3, "b": "4", "c": 2.0, "d": " 1.5 ", "e": 2.5}"#)
            .expect("args should parse");

        assert_eq!(required_i64(&args, "a").expect("int"), 3);
        assert_eq!(required_i64(&args, "b").expect("int string"), 4);
        assert_eq!(required_i64(&args, "c").expect("integral float"), 2);
        assert_eq!(required_f64(&args, "d").expect("float string"), 1.5);
        assert!(required_i64(&args, "e").is_err());
    }

    #[test]
    fn missing_and_mistyped_values_name_the_key() {
        let args = parse_json_object(r#"{"flag": true}"#).expect("args should parse");

        let missing = required_string(&args, "product_name").expect_err("missing");
        assert!(missing.message.contains("product_name"));

        let mistyped = required_f64(&args, "flag").expect_err("bool is not a number");
        assert_eq!(mistyped.message, "'flag' must be a number");
    }
}
