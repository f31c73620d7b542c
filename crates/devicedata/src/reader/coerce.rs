//! Typed extraction of a single document value.
//!
//! Shared by the object and array readers. Every function takes the context
//! of the *container* and the segment of the value inside it, so a mismatch is
//! reported at the value's own location.

use serde_json::{Map, Value};

use crate::context::{Context, PathSegment};

use super::errors;

/// Whole-number representation first, float truncation second. Values
/// outside the `i64` range do not coerce.
pub(crate) fn integer_of(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|float| (I64_LOWER..I64_UPPER).contains(float))
            .map(|float| float as i64)
    })
}

const I64_LOWER: f64 = i64::MIN as f64;
// 2^63, the first float past i64::MAX.
const I64_UPPER: f64 = -(i64::MIN as f64);

/// Float representation first, whole-number conversion second.
pub(crate) fn float_of(value: &Value) -> Option<f64> {
    let Value::Number(number) = value else {
        return None;
    };
    if number.is_f64() {
        return number.as_f64();
    }
    number
        .as_i64()
        .map(|integer| integer as f64)
        .or_else(|| number.as_u64().map(|integer| integer as f64))
}

pub(crate) fn boolean(context: &Context<'_>, segment: PathSegment, value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        other => {
            context.append_error(segment, errors::type_not_boolean(other));
            None
        }
    }
}

pub(crate) fn integer(context: &Context<'_>, segment: PathSegment, value: &Value) -> Option<i64> {
    let integer = integer_of(value);
    if integer.is_none() {
        context.append_error(segment, errors::type_not_integer(value));
    }
    integer
}

pub(crate) fn float(context: &Context<'_>, segment: PathSegment, value: &Value) -> Option<f64> {
    let float = float_of(value);
    if float.is_none() {
        context.append_error(segment, errors::type_not_float(value));
    }
    float
}

pub(crate) fn string(context: &Context<'_>, segment: PathSegment, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        other => {
            context.append_error(segment, errors::type_not_string(other));
            None
        }
    }
}

pub(crate) fn object<'d>(
    context: &Context<'_>,
    segment: PathSegment,
    value: &'d Value,
) -> Option<&'d Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        other => {
            context.append_error(segment, errors::type_not_object(other));
            None
        }
    }
}

pub(crate) fn array<'d>(
    context: &Context<'_>,
    segment: PathSegment,
    value: &'d Value,
) -> Option<&'d Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        other => {
            context.append_error(segment, errors::type_not_array(other));
            None
        }
    }
}

/// Elements that are not strings are reported at their index and read as
/// empty strings, so the array keeps its length.
pub(crate) fn string_array(
    context: &Context<'_>,
    segment: PathSegment,
    value: &Value,
) -> Option<Vec<String>> {
    let items = array(context, segment.clone(), value)?;
    let child = context.descend(segment);
    Some(
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                string(&child, PathSegment::Index(index), item).unwrap_or_default()
            })
            .collect(),
    )
}

/// Elements that are not objects are reported at their index and left as
/// `None` in their slot.
pub(crate) fn object_array<'d>(
    context: &Context<'_>,
    segment: PathSegment,
    value: &'d Value,
) -> Option<Vec<Option<&'d Map<String, Value>>>> {
    let items = array(context, segment.clone(), value)?;
    let child = context.descend(segment);
    Some(
        items
            .iter()
            .enumerate()
            .map(|(index, item)| object(&child, PathSegment::Index(index), item))
            .collect(),
    )
}
