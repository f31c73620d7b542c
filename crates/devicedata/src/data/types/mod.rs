//! Concrete record variants.
//!
//! Each variant owns a [`Base`](super::Base) plus its own fields and
//! forwards parse/validate to the base before handling the rest. Field
//! groups shared by several variants (glucose readings, bolus portions) are
//! separate structs held by value.

pub mod basal;
pub mod bolus;
pub mod calculator;
pub mod device;
pub mod glucose;
pub mod settings;

use crate::reader::{ArrayReader, ObjectReader};
use crate::validator::Validator;

/// Parse every element of an object array. Elements that are not objects are
/// reported by the reader and kept as `None` so later indices stay aligned.
pub(crate) fn parse_object_array<'s, 'd, T>(
    reader: &ArrayReader<'s, 'd>,
    parse: impl Fn(&ObjectReader<'s, 'd>) -> T,
) -> Option<Vec<Option<T>>> {
    reader.array()?;
    let items = (0..reader.len())
        .map(|index| {
            let child = reader.object_reader(index);
            child.object()?;
            let item = parse(&child);
            child.finish();
            Some(item)
        })
        .collect();
    reader.finish();
    Some(items)
}

/// Validate each parsed element at `/<key>/<index>`.
pub(crate) fn validate_object_array<T>(
    validator: &Validator<'_>,
    key: &str,
    items: Option<&[Option<T>]>,
    validate: impl Fn(&T, &Validator<'_>),
) {
    let Some(items) = items else {
        return;
    };
    let validator = validator.descend(key);
    for (index, item) in items.iter().enumerate() {
        if let Some(item) = item {
            validate(item, &validator.descend(index));
        }
    }
}
