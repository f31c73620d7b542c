//! Numeric constraint chains.

use std::fmt::{Debug, Display};

use crate::context::ErrorDetail;

use super::errors;
use super::field::Field;

/// Constraint chain over an optional number.
///
/// Every check other than `exists`/`not_exists` passes when the value is
/// absent.
#[derive(Debug, Clone)]
pub struct NumberChain<'s, T> {
    field: Field<'s>,
    value: Option<T>,
}

pub type IntegerChain<'s> = NumberChain<'s, i64>;
pub type FloatChain<'s> = NumberChain<'s, f64>;

impl<'s, T> NumberChain<'s, T>
where
    T: Copy + PartialOrd + Display + Debug,
{
    pub(crate) fn new(field: Field<'s>, value: Option<T>) -> Self {
        Self { field, value }
    }

    pub fn value(&self) -> Option<T> {
        self.value
    }

    /// Whether any check in this chain has failed.
    pub fn failed(&self) -> bool {
        self.field.failed()
    }

    fn when(mut self, ok: impl FnOnce(T) -> bool, detail: impl FnOnce(T) -> ErrorDetail) -> Self {
        if let Some(value) = self.value {
            let passes = ok(value);
            self.field.check(passes, || detail(value));
        }
        self
    }

    pub fn exists(mut self) -> Self {
        self.field.check(self.value.is_some(), errors::value_not_exists);
        self
    }

    pub fn not_exists(mut self) -> Self {
        self.field.check(self.value.is_none(), errors::value_exists);
        self
    }

    pub fn equal_to(self, limit: T) -> Self {
        self.when(|v| v == limit, |v| errors::value_not_equal_to(v, limit))
    }

    pub fn not_equal_to(self, limit: T) -> Self {
        self.when(|v| v != limit, |v| errors::value_equal_to(v, limit))
    }

    pub fn less_than(self, limit: T) -> Self {
        self.when(|v| v < limit, |v| errors::value_not_less_than(v, limit))
    }

    pub fn less_than_or_equal_to(self, limit: T) -> Self {
        self.when(
            |v| v <= limit,
            |v| errors::value_not_less_than_or_equal_to(v, limit),
        )
    }

    pub fn greater_than(self, limit: T) -> Self {
        self.when(|v| v > limit, |v| errors::value_not_greater_than(v, limit))
    }

    pub fn greater_than_or_equal_to(self, limit: T) -> Self {
        self.when(
            |v| v >= limit,
            |v| errors::value_not_greater_than_or_equal_to(v, limit),
        )
    }

    /// Inclusive on both ends.
    pub fn in_range(self, low: T, high: T) -> Self {
        self.when(
            |v| low <= v && v <= high,
            |v| errors::value_not_in_range(v, low, high),
        )
    }

    pub fn one_of(self, allowed: &[T]) -> Self {
        self.when(
            |v| allowed.contains(&v),
            |v| errors::value_not_one_of(&v, allowed),
        )
    }

    pub fn not_one_of(self, disallowed: &[T]) -> Self {
        self.when(
            |v| !disallowed.contains(&v),
            |v| errors::value_one_of(&v, disallowed),
        )
    }
}
