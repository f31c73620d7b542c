//! Semantic errors reported by validator chains.
//!
//! Codes and titles are stable; only details interpolate values.

use std::fmt::{Debug, Display};

use crate::context::ErrorDetail;

pub fn value_not_exists() -> ErrorDetail {
    ErrorDetail::new("value-not-exists", "value does not exist", "Value does not exist")
}

pub fn value_exists() -> ErrorDetail {
    ErrorDetail::new("value-exists", "value exists", "Value exists")
}

pub fn value_empty() -> ErrorDetail {
    ErrorDetail::new("value-empty", "value is empty", "Value is empty")
}

pub fn value_not_empty() -> ErrorDetail {
    ErrorDetail::new("value-not-empty", "value is not empty", "Value is not empty")
}

pub fn value_not_true() -> ErrorDetail {
    ErrorDetail::new("value-not-true", "value is not true", "Value is not true")
}

pub fn value_not_false() -> ErrorDetail {
    ErrorDetail::new("value-not-false", "value is not false", "Value is not false")
}

fn compare(code: &str, relation: &str, value: impl Display, limit: impl Display) -> ErrorDetail {
    ErrorDetail::new(
        code,
        format!("value is {}", relation),
        format!("Value {} is {} {}", value, relation, limit),
    )
}

pub fn value_not_equal_to(value: impl Display, limit: impl Display) -> ErrorDetail {
    compare("value-not-equal-to", "not equal to", value, limit)
}

pub fn value_equal_to(value: impl Display, limit: impl Display) -> ErrorDetail {
    compare("value-equal-to", "equal to", value, limit)
}

pub fn value_not_less_than(value: impl Display, limit: impl Display) -> ErrorDetail {
    compare("value-not-less-than", "not less than", value, limit)
}

pub fn value_not_less_than_or_equal_to(value: impl Display, limit: impl Display) -> ErrorDetail {
    compare(
        "value-not-less-than-or-equal-to",
        "not less than or equal to",
        value,
        limit,
    )
}

pub fn value_not_greater_than(value: impl Display, limit: impl Display) -> ErrorDetail {
    compare("value-not-greater-than", "not greater than", value, limit)
}

pub fn value_not_greater_than_or_equal_to(value: impl Display, limit: impl Display) -> ErrorDetail {
    compare(
        "value-not-greater-than-or-equal-to",
        "not greater than or equal to",
        value,
        limit,
    )
}

pub fn value_not_in_range(value: impl Display, low: impl Display, high: impl Display) -> ErrorDetail {
    ErrorDetail::new(
        "value-not-in-range",
        "value is not in range",
        format!("Value {} is not between {} and {}", value, low, high),
    )
}

/// The allowed set is echoed verbatim in the detail.
pub fn value_not_one_of<V: Debug + ?Sized, A: Debug + ?Sized>(value: &V, allowed: &A) -> ErrorDetail {
    ErrorDetail::new(
        "value-not-one-of",
        "value is not one of the allowed values",
        format!("Value {:?} is not one of {:?}", value, allowed),
    )
}

pub fn value_one_of<V: Debug + ?Sized, A: Debug + ?Sized>(value: &V, disallowed: &A) -> ErrorDetail {
    ErrorDetail::new(
        "value-one-of",
        "value is one of the disallowed values",
        format!("Value {:?} is one of {:?}", value, disallowed),
    )
}

fn length(code: &str, relation: &str, length: usize, limit: usize) -> ErrorDetail {
    ErrorDetail::new(
        code,
        format!("length is {}", relation),
        format!("Length {} is {} {}", length, relation, limit),
    )
}

pub fn length_not_equal_to(value: usize, limit: usize) -> ErrorDetail {
    length("length-not-equal-to", "not equal to", value, limit)
}

pub fn length_equal_to(value: usize, limit: usize) -> ErrorDetail {
    length("length-equal-to", "equal to", value, limit)
}

pub fn length_not_less_than(value: usize, limit: usize) -> ErrorDetail {
    length("length-not-less-than", "not less than", value, limit)
}

pub fn length_not_less_than_or_equal_to(value: usize, limit: usize) -> ErrorDetail {
    length(
        "length-not-less-than-or-equal-to",
        "not less than or equal to",
        value,
        limit,
    )
}

pub fn length_not_greater_than(value: usize, limit: usize) -> ErrorDetail {
    length("length-not-greater-than", "not greater than", value, limit)
}

pub fn length_not_greater_than_or_equal_to(value: usize, limit: usize) -> ErrorDetail {
    length(
        "length-not-greater-than-or-equal-to",
        "not greater than or equal to",
        value,
        limit,
    )
}

pub fn length_not_in_range(value: usize, low: usize, high: usize) -> ErrorDetail {
    ErrorDetail::new(
        "length-not-in-range",
        "length is not in range",
        format!("Length {} is not between {} and {}", value, low, high),
    )
}

pub fn time_not_valid(value: &str, layout: &str) -> ErrorDetail {
    ErrorDetail::new(
        "time-not-valid",
        "value is not a valid time",
        format!("Value {:?} is not a valid time of format {:?}", value, layout),
    )
}

pub fn time_not_after(value: &str, limit: &str) -> ErrorDetail {
    ErrorDetail::new(
        "time-not-after",
        "value is not after the specified time",
        format!("Value {:?} is not after {:?}", value, limit),
    )
}

pub fn time_not_after_now(value: &str) -> ErrorDetail {
    ErrorDetail::new(
        "time-not-after-now",
        "value is not after now",
        format!("Value {:?} is not after now", value),
    )
}

pub fn time_not_before(value: &str, limit: &str) -> ErrorDetail {
    ErrorDetail::new(
        "time-not-before",
        "value is not before the specified time",
        format!("Value {:?} is not before {:?}", value, limit),
    )
}

pub fn time_not_before_now(value: &str) -> ErrorDetail {
    ErrorDetail::new(
        "time-not-before-now",
        "value is not before now",
        format!("Value {:?} is not before now", value),
    )
}
