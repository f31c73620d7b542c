//! String constraint chains.

use super::errors;
use super::field::Field;

/// Constraint chain over an optional string. Lengths count characters.
#[derive(Debug, Clone)]
pub struct StringChain<'s, 'v> {
    field: Field<'s>,
    value: Option<&'v str>,
}

impl<'s, 'v> StringChain<'s, 'v> {
    pub(crate) fn new(field: Field<'s>, value: Option<&'v str>) -> Self {
        Self { field, value }
    }

    pub fn failed(&self) -> bool {
        self.field.failed()
    }

    fn when(
        mut self,
        ok: impl FnOnce(&str) -> bool,
        detail: impl FnOnce(&str) -> crate::context::ErrorDetail,
    ) -> Self {
        if let Some(value) = self.value {
            let passes = ok(value);
            self.field.check(passes, || detail(value));
        }
        self
    }

    fn when_length(
        self,
        ok: impl FnOnce(usize) -> bool,
        detail: impl FnOnce(usize) -> crate::context::ErrorDetail,
    ) -> Self {
        self.when(
            |v| ok(v.chars().count()),
            |v| detail(v.chars().count()),
        )
    }

    pub fn exists(mut self) -> Self {
        self.field.check(self.value.is_some(), errors::value_not_exists);
        self
    }

    pub fn not_exists(mut self) -> Self {
        self.field.check(self.value.is_none(), errors::value_exists);
        self
    }

    pub fn empty(self) -> Self {
        self.when(|v| v.is_empty(), |_| errors::value_not_empty())
    }

    pub fn not_empty(self) -> Self {
        self.when(|v| !v.is_empty(), |_| errors::value_empty())
    }

    pub fn equal_to(self, limit: &str) -> Self {
        self.when(|v| v == limit, |v| {
            errors::value_not_equal_to(format!("{:?}", v), format!("{:?}", limit))
        })
    }

    pub fn not_equal_to(self, limit: &str) -> Self {
        self.when(|v| v != limit, |v| {
            errors::value_equal_to(format!("{:?}", v), format!("{:?}", limit))
        })
    }

    pub fn length_equal_to(self, limit: usize) -> Self {
        self.when_length(|n| n == limit, |n| errors::length_not_equal_to(n, limit))
    }

    pub fn length_not_equal_to(self, limit: usize) -> Self {
        self.when_length(|n| n != limit, |n| errors::length_equal_to(n, limit))
    }

    pub fn length_less_than(self, limit: usize) -> Self {
        self.when_length(|n| n < limit, |n| errors::length_not_less_than(n, limit))
    }

    pub fn length_less_than_or_equal_to(self, limit: usize) -> Self {
        self.when_length(
            |n| n <= limit,
            |n| errors::length_not_less_than_or_equal_to(n, limit),
        )
    }

    pub fn length_greater_than(self, limit: usize) -> Self {
        self.when_length(|n| n > limit, |n| errors::length_not_greater_than(n, limit))
    }

    pub fn length_greater_than_or_equal_to(self, limit: usize) -> Self {
        self.when_length(
            |n| n >= limit,
            |n| errors::length_not_greater_than_or_equal_to(n, limit),
        )
    }

    pub fn length_in_range(self, low: usize, high: usize) -> Self {
        self.when_length(
            |n| low <= n && n <= high,
            |n| errors::length_not_in_range(n, low, high),
        )
    }

    /// The allowed set is echoed verbatim in the error detail.
    pub fn one_of(self, allowed: &[&str]) -> Self {
        self.when(|v| allowed.contains(&v), |v| errors::value_not_one_of(v, allowed))
    }

    pub fn not_one_of(self, disallowed: &[&str]) -> Self {
        self.when(|v| !disallowed.contains(&v), |v| errors::value_one_of(v, disallowed))
    }
}
