//! Structural errors reported by the readers.

use serde_json::Value;

use crate::context::ErrorDetail;

/// Name of the dynamic type of a document value, as shown in error details.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_not(expected: &str, value: &Value) -> ErrorDetail {
    ErrorDetail::new(
        format!("type-not-{}", expected),
        format!("type is not {}", expected),
        format!("Type is not {}, but {}", expected, value_kind(value)),
    )
}

pub fn type_not_boolean(value: &Value) -> ErrorDetail {
    type_not("boolean", value)
}

pub fn type_not_integer(value: &Value) -> ErrorDetail {
    type_not("integer", value)
}

pub fn type_not_float(value: &Value) -> ErrorDetail {
    type_not("float", value)
}

pub fn type_not_string(value: &Value) -> ErrorDetail {
    type_not("string", value)
}

pub fn type_not_object(value: &Value) -> ErrorDetail {
    type_not("object", value)
}

pub fn type_not_array(value: &Value) -> ErrorDetail {
    type_not("array", value)
}

pub fn not_parsed() -> ErrorDetail {
    ErrorDetail::new("not-parsed", "value is not parsed", "Value is not parsed")
}
