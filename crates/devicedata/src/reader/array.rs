//! Reader over a document array.

use std::cell::RefCell;
use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::context::{Context, PathSegment};

use super::coerce;
use super::object::ObjectReader;

/// Type-coercing accessors for the elements of one document array.
///
/// An index past the end reads as "no value" and records nothing, so trailing
/// optional elements can be probed freely.
#[derive(Debug)]
pub struct ArrayReader<'s, 'd> {
    context: Context<'s>,
    array: Option<&'d Vec<Value>>,
    parsed: RefCell<HashSet<usize>>,
    strict: bool,
}

impl<'s, 'd> ArrayReader<'s, 'd> {
    pub fn new(context: Context<'s>, array: Option<&'d Vec<Value>>) -> Self {
        Self {
            context,
            array,
            parsed: RefCell::new(HashSet::new()),
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn context(&self) -> &Context<'s> {
        &self.context
    }

    pub fn array(&self) -> Option<&'d Vec<Value>> {
        self.array
    }

    /// Number of elements; zero when the array itself is absent.
    pub fn len(&self) -> usize {
        self.array.map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn raw(&self, index: usize) -> Option<&'d Value> {
        let value = self.array?.get(index)?;
        self.parsed.borrow_mut().insert(index);
        Some(value)
    }

    pub fn read_boolean(&self, index: usize) -> Option<bool> {
        coerce::boolean(&self.context, index.into(), self.raw(index)?)
    }

    pub fn read_integer(&self, index: usize) -> Option<i64> {
        coerce::integer(&self.context, index.into(), self.raw(index)?)
    }

    pub fn read_float(&self, index: usize) -> Option<f64> {
        coerce::float(&self.context, index.into(), self.raw(index)?)
    }

    pub fn read_string(&self, index: usize) -> Option<String> {
        coerce::string(&self.context, index.into(), self.raw(index)?)
    }

    pub fn read_string_array(&self, index: usize) -> Option<Vec<String>> {
        coerce::string_array(&self.context, index.into(), self.raw(index)?)
    }

    pub fn read_object(&self, index: usize) -> Option<&'d Map<String, Value>> {
        coerce::object(&self.context, index.into(), self.raw(index)?)
    }

    pub fn read_object_array(
        &self,
        index: usize,
    ) -> Option<Vec<Option<&'d Map<String, Value>>>> {
        coerce::object_array(&self.context, index.into(), self.raw(index)?)
    }

    pub fn read_array(&self, index: usize) -> Option<&'d Vec<Value>> {
        coerce::array(&self.context, index.into(), self.raw(index)?)
    }

    pub fn read_raw(&self, index: usize) -> Option<&'d Value> {
        self.raw(index)
    }

    pub fn object_reader(&self, index: usize) -> ObjectReader<'s, 'd> {
        ObjectReader::new(self.context.descend(index), self.read_object(index)).strict(self.strict)
    }

    pub fn array_reader(&self, index: usize) -> ArrayReader<'s, 'd> {
        ArrayReader::new(self.context.descend(index), self.read_array(index)).strict(self.strict)
    }

    pub fn finish(&self) {
        if self.strict {
            self.process_not_parsed();
        }
    }

    /// Report every element that no accessor has touched.
    pub fn process_not_parsed(&self) {
        let parsed = self.parsed.borrow();
        for index in (0..self.len()).filter(|index| !parsed.contains(index)) {
            self.context
                .append_error(PathSegment::Index(index), super::errors::not_parsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ErrorSink;
    use serde_json::json;

    #[test]
    fn test_out_of_range_index_is_silent() {
        let sink = ErrorSink::new();
        let doc = json!([1, 2]);
        let reader = ArrayReader::new(Context::new(&sink), doc.as_array());

        assert_eq!(reader.read_integer(5), None);
        assert_eq!(reader.read_string(2), None);
        assert!(reader.read_object(9).is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_element_type_error_path() {
        let sink = ErrorSink::new();
        let doc = json!({"bgTarget": [{"low": 4.0}, "x"]});
        let root = Context::new(&sink);
        let reader = ArrayReader::new(root.descend("bgTarget"), doc["bgTarget"].as_array());

        assert!(reader.read_object(0).is_some());
        assert!(reader.read_object(1).is_none());

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer(), "/bgTarget/1");
    }

    #[test]
    fn test_nested_object_reader() {
        let sink = ErrorSink::new();
        let doc = json!([{"start": "midnight"}]);
        let reader = ArrayReader::new(Context::new(&sink), doc.as_array());

        let first = reader.object_reader(0);
        assert_eq!(first.read_integer("start"), None);
        assert_eq!(sink.errors()[0].pointer(), "/0/start");
    }

    #[test]
    fn test_len_of_absent_array() {
        let sink = ErrorSink::new();
        let reader = ArrayReader::new(Context::new(&sink), None);
        assert_eq!(reader.len(), 0);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_process_not_parsed() {
        let sink = ErrorSink::new();
        let doc = json!([true, false, true]);
        let reader = ArrayReader::new(Context::new(&sink), doc.as_array());

        reader.read_boolean(1);
        reader.process_not_parsed();

        let pointers: Vec<_> = sink.errors().iter().map(|e| e.pointer().to_string()).collect();
        assert_eq!(pointers, vec!["/0", "/2"]);
    }
}
