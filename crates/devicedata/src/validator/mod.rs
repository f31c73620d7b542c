//! Fluent constraint chains over values already extracted by the readers.
//!
//! Each `validate_*` call binds one field's location and starts a chain.
//! Checks return the chain by value, so a chain is composed as a builder:
//!
//! ```
//! use devicedata::context::{Context, ErrorSink};
//! use devicedata::validator::Validator;
//!
//! let sink = ErrorSink::new();
//! let validator = Validator::new(Context::new(&sink));
//!
//! validator.validate_float("rate", Some(25.0)).exists().in_range(0.0, 20.0);
//! validator.validate_string("scheduleName", None).exists();
//!
//! assert_eq!(sink.len(), 2);
//! ```
//!
//! A failing check stops the rest of its own chain but never affects the
//! chains of other fields.

mod boolean;
mod collection;
pub mod errors;
mod field;
mod number;
mod string;
mod time;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::context::{Context, PathSegment};

use field::Field;

pub use boolean::BooleanChain;
pub use collection::CollectionChain;
pub use number::{FloatChain, IntegerChain, NumberChain};
pub use string::StringChain;
pub use time::{TimeChain, TimeLayout};

/// Entry point for field validation at one location in the document.
#[derive(Debug, Clone)]
pub struct Validator<'s> {
    context: Context<'s>,
}

impl<'s> Validator<'s> {
    pub fn new(context: Context<'s>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Context<'s> {
        &self.context
    }

    /// Validator for a nested object or array element.
    pub fn descend(&self, segment: impl Into<PathSegment>) -> Validator<'s> {
        Validator::new(self.context.descend(segment))
    }

    fn field(&self, segment: impl Into<PathSegment>) -> Field<'s> {
        Field::new(self.context.clone(), segment.into())
    }

    pub fn validate_boolean(&self, segment: impl Into<PathSegment>, value: Option<bool>) -> BooleanChain<'s> {
        BooleanChain::new(self.field(segment), value)
    }

    pub fn validate_integer(&self, segment: impl Into<PathSegment>, value: Option<i64>) -> IntegerChain<'s> {
        NumberChain::new(self.field(segment), value)
    }

    pub fn validate_float(&self, segment: impl Into<PathSegment>, value: Option<f64>) -> FloatChain<'s> {
        NumberChain::new(self.field(segment), value)
    }

    pub fn validate_string<'v>(
        &self,
        segment: impl Into<PathSegment>,
        value: Option<&'v str>,
    ) -> StringChain<'s, 'v> {
        StringChain::new(self.field(segment), value)
    }

    pub fn validate_string_as_time<'v>(
        &self,
        segment: impl Into<PathSegment>,
        value: Option<&'v str>,
        layout: TimeLayout,
    ) -> TimeChain<'s, 'v> {
        TimeChain::new(self.field(segment), value, layout)
    }

    /// Start a chain over the size of an object or array.
    pub fn validate_collection<C: Collection + ?Sized>(
        &self,
        segment: impl Into<PathSegment>,
        value: Option<&C>,
    ) -> CollectionChain<'s> {
        CollectionChain::new(self.field(segment), value.map(|collection| collection.length()))
    }

    pub fn validate_object<C: Collection + ?Sized>(
        &self,
        segment: impl Into<PathSegment>,
        value: Option<&C>,
    ) -> CollectionChain<'s> {
        self.validate_collection(segment, value)
    }

    pub fn validate_string_array(
        &self,
        segment: impl Into<PathSegment>,
        value: Option<&[String]>,
    ) -> CollectionChain<'s> {
        self.validate_collection(segment, value)
    }

    pub fn validate_object_array<T>(
        &self,
        segment: impl Into<PathSegment>,
        value: Option<&[T]>,
    ) -> CollectionChain<'s> {
        self.validate_collection(segment, value)
    }

    /// Require a typed nested value to be present. Returns whether it is.
    pub fn validate_exists<T>(&self, segment: impl Into<PathSegment>, value: Option<&T>) -> bool {
        if value.is_none() {
            self.context.append_error(segment, errors::value_not_exists());
        }
        value.is_some()
    }
}

/// Anything with a size that a [`CollectionChain`] can check.
pub trait Collection {
    fn length(&self) -> usize;
}

impl Collection for Map<String, Value> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> Collection for IndexMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Collection for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Collection for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}
