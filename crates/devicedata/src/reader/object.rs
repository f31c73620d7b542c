//! Reader over a document object.

use std::cell::RefCell;
use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::context::{Context, PathSegment};

use super::array::ArrayReader;
use super::{coerce, errors};

/// Type-coercing accessors for the fields of one document object.
///
/// A missing object (`None`) or a missing key reads as "no value" without
/// any error; only a present value of the wrong shape is reported.
#[derive(Debug)]
pub struct ObjectReader<'s, 'd> {
    context: Context<'s>,
    object: Option<&'d Map<String, Value>>,
    parsed: RefCell<HashSet<String>>,
    strict: bool,
}

impl<'s, 'd> ObjectReader<'s, 'd> {
    pub fn new(context: Context<'s>, object: Option<&'d Map<String, Value>>) -> Self {
        Self {
            context,
            object,
            parsed: RefCell::new(HashSet::new()),
            strict: false,
        }
    }

    /// Make [`finish`](Self::finish) report unread keys, here and in every
    /// child reader created afterwards.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn context(&self) -> &Context<'s> {
        &self.context
    }

    pub fn object(&self) -> Option<&'d Map<String, Value>> {
        self.object
    }

    /// Whether the key is present, without marking it as read.
    pub fn contains(&self, key: &str) -> bool {
        self.object.is_some_and(|object| object.contains_key(key))
    }

    fn raw(&self, key: &str) -> Option<&'d Value> {
        let object = self.object?;
        self.parsed.borrow_mut().insert(key.to_string());
        object.get(key)
    }

    pub fn read_boolean(&self, key: &str) -> Option<bool> {
        coerce::boolean(&self.context, key.into(), self.raw(key)?)
    }

    pub fn read_integer(&self, key: &str) -> Option<i64> {
        coerce::integer(&self.context, key.into(), self.raw(key)?)
    }

    pub fn read_float(&self, key: &str) -> Option<f64> {
        coerce::float(&self.context, key.into(), self.raw(key)?)
    }

    pub fn read_string(&self, key: &str) -> Option<String> {
        coerce::string(&self.context, key.into(), self.raw(key)?)
    }

    pub fn read_string_array(&self, key: &str) -> Option<Vec<String>> {
        coerce::string_array(&self.context, key.into(), self.raw(key)?)
    }

    pub fn read_object(&self, key: &str) -> Option<&'d Map<String, Value>> {
        coerce::object(&self.context, key.into(), self.raw(key)?)
    }

    pub fn read_object_array(&self, key: &str) -> Option<Vec<Option<&'d Map<String, Value>>>> {
        coerce::object_array(&self.context, key.into(), self.raw(key)?)
    }

    pub fn read_array(&self, key: &str) -> Option<&'d Vec<Value>> {
        coerce::array(&self.context, key.into(), self.raw(key)?)
    }

    /// The value as-is, whatever its shape.
    pub fn read_raw(&self, key: &str) -> Option<&'d Value> {
        self.raw(key)
    }

    /// Reader for a nested object; its errors carry `key` in their path.
    pub fn object_reader(&self, key: &str) -> ObjectReader<'s, 'd> {
        ObjectReader::new(self.context.descend(key), self.read_object(key)).strict(self.strict)
    }

    /// Reader for a nested array; its errors carry `key` in their path.
    pub fn array_reader(&self, key: &str) -> ArrayReader<'s, 'd> {
        ArrayReader::new(self.context.descend(key), self.read_array(key)).strict(self.strict)
    }

    /// Call once all fields have been read. In strict mode, unread keys are
    /// reported.
    pub fn finish(&self) {
        if self.strict {
            self.process_not_parsed();
        }
    }

    /// Report every key that no accessor has touched, in key order.
    pub fn process_not_parsed(&self) {
        let Some(object) = self.object else {
            return;
        };
        let parsed = self.parsed.borrow();
        for key in object.keys().filter(|key| !parsed.contains(*key)) {
            self.context
                .append_error(PathSegment::from(key), errors::not_parsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ErrorSink;
    use crate::validator::Validator;
    use serde_json::json;

    fn object(value: &Value) -> Option<&Map<String, Value>> {
        value.as_object()
    }

    #[test]
    fn test_missing_key_is_not_an_error() {
        let sink = ErrorSink::new();
        let doc = json!({"a": 1});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        assert_eq!(reader.read_string("missing"), None);
        assert_eq!(reader.read_integer("missing"), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_nil_object_reads_nothing() {
        let sink = ErrorSink::new();
        let reader = ObjectReader::new(Context::new(&sink), None);

        assert_eq!(reader.read_boolean("a"), None);
        assert!(reader.read_object("a").is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_wrong_type_is_reported_at_key() {
        let sink = ErrorSink::new();
        let doc = json!({"rate": "fast"});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        assert_eq!(reader.read_float("rate"), None);

        let errors = sink.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer(), "/rate");
        assert_eq!(errors[0].code(), "type-not-float");
        assert_eq!(errors[0].detail.detail, "Type is not float, but string");
    }

    #[test]
    fn test_null_is_a_present_value_of_wrong_type() {
        let sink = ErrorSink::new();
        let doc = json!({"deviceId": null});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        assert_eq!(reader.read_string("deviceId"), None);
        assert_eq!(sink.errors()[0].detail.detail, "Type is not string, but null");
    }

    #[test]
    fn test_numeric_coercion() {
        let sink = ErrorSink::new();
        let doc = json!({"duration": 3600000.0, "rate": 2});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        assert_eq!(reader.read_integer("duration"), Some(3600000));
        assert_eq!(reader.read_float("rate"), Some(2.0));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_nested_reader_paths() {
        let sink = ErrorSink::new();
        let doc = json!({"change": {"from": 12}});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        let change = reader.object_reader("change");
        assert_eq!(change.read_string("from"), None);

        assert_eq!(sink.errors()[0].pointer(), "/change/from");
    }

    #[test]
    fn test_nested_reader_of_wrong_type() {
        let sink = ErrorSink::new();
        let doc = json!({"change": "later"});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        let change = reader.object_reader("change");
        assert!(change.object().is_none());
        assert_eq!(change.read_string("from"), None);

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer(), "/change");
        assert_eq!(errors[0].code(), "type-not-object");
    }

    #[test]
    fn test_string_array_keeps_positions_of_bad_elements() {
        let sink = ErrorSink::new();
        let doc = json!({"tags": ["a", 2, "c"]});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        let tags = reader.read_string_array("tags").unwrap();
        assert_eq!(tags, vec!["a".to_string(), String::new(), "c".to_string()]);

        let validator = Validator::new(Context::new(&sink));
        validator
            .validate_string_array("tags", Some(tags.as_slice()))
            .length_equal_to(3);

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer(), "/tags/1");
        assert_eq!(errors[0].code(), "type-not-string");
    }

    #[test]
    fn test_object_array() {
        let sink = ErrorSink::new();
        let doc = json!({"annotations": [{"code": "x"}, "nope", {"code": "y"}]});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        let annotations = reader.read_object_array("annotations").unwrap();
        assert_eq!(annotations.len(), 3);
        assert!(annotations[1].is_none());
        assert_eq!(annotations[2].and_then(|a| a.get("code")), Some(&json!("y")));
        assert_eq!(sink.errors().len(), 1);
        assert_eq!(sink.errors()[0].pointer(), "/annotations/1");
        assert_eq!(sink.errors()[0].code(), "type-not-object");
    }

    #[test]
    fn test_process_not_parsed() {
        let sink = ErrorSink::new();
        let doc = json!({"a": 1, "b": 2, "c": 3});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        reader.read_integer("b");
        reader.process_not_parsed();

        let pointers: Vec<_> = sink.errors().iter().map(|e| e.pointer().to_string()).collect();
        assert_eq!(pointers, vec!["/a", "/c"]);
        assert!(sink.errors().iter().all(|e| e.code() == "not-parsed"));
    }

    #[test]
    fn test_contains_does_not_mark_parsed() {
        let sink = ErrorSink::new();
        let doc = json!({"a": 1});
        let reader = ObjectReader::new(Context::new(&sink), object(&doc));

        assert!(reader.contains("a"));
        reader.process_not_parsed();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_finish_reports_only_when_strict() {
        let sink = ErrorSink::new();
        let doc = json!({"units": {"bg": "mg/dL", "extra": 1}});

        let lenient = ObjectReader::new(Context::new(&sink), object(&doc));
        lenient.object_reader("units").finish();
        lenient.finish();
        assert!(sink.is_empty());

        let strict = ObjectReader::new(Context::new(&sink), object(&doc)).strict(true);
        let units = strict.object_reader("units");
        units.read_string("bg");
        units.finish();
        strict.finish();

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer(), "/units/extra");
    }
}
