//! Constraint chains over objects and arrays.
//!
//! Only presence and size are checked here; element contents are validated
//! by the record that owns them.

use super::errors;
use super::field::Field;

/// Constraint chain over the size of an optional object or array.
#[derive(Debug, Clone)]
pub struct CollectionChain<'s> {
    field: Field<'s>,
    length: Option<usize>,
}

impl<'s> CollectionChain<'s> {
    pub(crate) fn new(field: Field<'s>, length: Option<usize>) -> Self {
        Self { field, length }
    }

    pub fn failed(&self) -> bool {
        self.field.failed()
    }

    fn when(
        mut self,
        ok: impl FnOnce(usize) -> bool,
        detail: impl FnOnce(usize) -> crate::context::ErrorDetail,
    ) -> Self {
        if let Some(length) = self.length {
            let passes = ok(length);
            self.field.check(passes, || detail(length));
        }
        self
    }

    pub fn exists(mut self) -> Self {
        self.field.check(self.length.is_some(), errors::value_not_exists);
        self
    }

    pub fn not_exists(mut self) -> Self {
        self.field.check(self.length.is_none(), errors::value_exists);
        self
    }

    pub fn empty(self) -> Self {
        self.when(|n| n == 0, |_| errors::value_not_empty())
    }

    pub fn not_empty(self) -> Self {
        self.when(|n| n > 0, |_| errors::value_empty())
    }

    pub fn length_equal_to(self, limit: usize) -> Self {
        self.when(|n| n == limit, |n| errors::length_not_equal_to(n, limit))
    }

    pub fn length_less_than_or_equal_to(self, limit: usize) -> Self {
        self.when(
            |n| n <= limit,
            |n| errors::length_not_less_than_or_equal_to(n, limit),
        )
    }

    pub fn length_greater_than_or_equal_to(self, limit: usize) -> Self {
        self.when(
            |n| n >= limit,
            |n| errors::length_not_greater_than_or_equal_to(n, limit),
        )
    }

    pub fn length_in_range(self, low: usize, high: usize) -> Self {
        self.when(
            |n| low <= n && n <= high,
            |n| errors::length_not_in_range(n, low, high),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, ErrorSink};

    fn chain(sink: &ErrorSink, length: Option<usize>) -> CollectionChain<'_> {
        CollectionChain::new(Field::new(Context::new(sink), "bgTarget".into()), length)
    }

    #[test]
    fn test_presence() {
        let sink = ErrorSink::new();
        chain(&sink, Some(0)).exists();
        assert!(sink.is_empty());

        chain(&sink, None).exists();
        assert_eq!(sink.errors()[0].code(), "value-not-exists");
    }

    #[test]
    fn test_not_empty() {
        let sink = ErrorSink::new();
        chain(&sink, Some(0)).exists().not_empty().length_in_range(1, 48);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.errors()[0].code(), "value-empty");
    }

    #[test]
    fn test_length_in_range() {
        let sink = ErrorSink::new();
        chain(&sink, Some(49)).length_in_range(1, 48);
        assert_eq!(
            sink.errors()[0].detail.detail,
            "Length 49 is not between 1 and 48"
        );
    }
}
