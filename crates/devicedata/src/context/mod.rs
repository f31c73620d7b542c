//! Path-scoped error accumulation.
//!
//! Every reader, validator and normalizer call is handed a [`Context`]. The
//! context knows where in the document it points and appends errors into an
//! [`ErrorSink`] shared by the whole record:
//!
//! ```
//! use devicedata::context::{Context, ErrorDetail, ErrorSink};
//!
//! let sink = ErrorSink::new();
//! let root = Context::new(&sink);
//! root.descend("change")
//!     .append_error("from", ErrorDetail::new("code", "title", "detail"));
//!
//! assert_eq!(sink.errors()[0].pointer(), "/change/from");
//! ```

mod detail;
mod path;
mod sink;

pub use detail::{ContextError, ErrorDetail, ErrorSource, Meta};
pub use path::{pointer, PathSegment};
pub use sink::{Context, ErrorSink};
