//! Type-coercing readers over a decoded document.
//!
//! Absence is never an error here; whether a field is required is decided by
//! the [`validator`](crate::validator). A present value of the wrong shape is
//! reported through the reader's [`Context`](crate::context::Context) and
//! reads as `None`.

mod array;
mod coerce;
pub mod errors;
mod object;

pub use array::ArrayReader;
pub use object::ObjectReader;
