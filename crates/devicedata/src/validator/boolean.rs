use super::errors;
use super::field::Field;

/// Constraint chain over an optional boolean.
#[derive(Debug, Clone)]
pub struct BooleanChain<'s> {
    field: Field<'s>,
    value: Option<bool>,
}

impl<'s> BooleanChain<'s> {
    pub(crate) fn new(field: Field<'s>, value: Option<bool>) -> Self {
        Self { field, value }
    }

    pub fn failed(&self) -> bool {
        self.field.failed()
    }

    pub fn exists(mut self) -> Self {
        self.field.check(self.value.is_some(), errors::value_not_exists);
        self
    }

    pub fn not_exists(mut self) -> Self {
        self.field.check(self.value.is_none(), errors::value_exists);
        self
    }

    pub fn is_true(mut self) -> Self {
        self.field.check(self.value != Some(false), errors::value_not_true);
        self
    }

    pub fn is_false(mut self) -> Self {
        self.field.check(self.value != Some(true), errors::value_not_false);
        self
    }
}
