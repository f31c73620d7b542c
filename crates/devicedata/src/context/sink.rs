//! The shared error sink and the path-scoped context handles that feed it.

use std::cell::RefCell;

use super::detail::{ContextError, ErrorDetail, Meta};
use super::path::{pointer, PathSegment};

/// Collects every error of one top-level parse, in discovery order.
///
/// A sink is owned by a single invocation and is not shared across threads;
/// concurrent callers each create their own.
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: RefCell<Vec<ContextError>>,
    meta: RefCell<Option<Meta>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach record meta to every error appended from now on.
    pub fn set_meta(&self, meta: Meta) {
        *self.meta.borrow_mut() = Some(meta);
    }

    pub fn meta(&self) -> Option<Meta> {
        self.meta.borrow().clone()
    }

    fn push(&self, pointer: String, mut detail: ErrorDetail) {
        if detail.meta.is_none() {
            detail.meta = self.meta();
        }
        self.errors.borrow_mut().push(ContextError::new(pointer, detail));
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// Snapshot of the errors collected so far.
    pub fn errors(&self) -> Vec<ContextError> {
        self.errors.borrow().clone()
    }

    pub fn into_errors(self) -> Vec<ContextError> {
        self.errors.into_inner()
    }
}

/// A position in the document plus a handle to the shared sink.
///
/// Descending never copies the sink: every child appends into the same one.
#[derive(Debug, Clone)]
pub struct Context<'s> {
    sink: &'s ErrorSink,
    path: Vec<PathSegment>,
}

impl<'s> Context<'s> {
    /// A root context with an empty path.
    pub fn new(sink: &'s ErrorSink) -> Self {
        Self {
            sink,
            path: Vec::new(),
        }
    }

    /// Child context whose path has `segment` appended.
    pub fn descend(&self, segment: impl Into<PathSegment>) -> Context<'s> {
        let mut path = self.path.clone();
        path.push(segment.into());
        Context {
            sink: self.sink,
            path,
        }
    }

    /// Record `detail` at this context's path plus `segment`.
    pub fn append_error(&self, segment: impl Into<PathSegment>, detail: ErrorDetail) {
        let segment = segment.into();
        let pointer = pointer(self.path.iter().chain(std::iter::once(&segment)));
        self.sink.push(pointer, detail);
    }

    /// Record `detail` at this context's own path.
    pub fn append_error_here(&self, detail: ErrorDetail) {
        self.sink.push(self.pointer(), detail);
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn pointer(&self) -> String {
        pointer(&self.path)
    }

    pub fn sink(&self) -> &'s ErrorSink {
        self.sink
    }
}
