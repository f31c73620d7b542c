//! devicedata: parsing, validation and normalization of diabetes device records.
//!
//! Device uploads arrive as loosely typed JSON documents. Each document is
//! turned into one typed record variant and checked field by field; every
//! problem is collected with the JSON pointer of the offending field instead
//! of stopping at the first one.
//!
//! # Pipeline
//!
//! - [`data::dispatch`] picks the variant from `type` and `subType` or
//!   `deliveryType`
//! - [`reader`] extracts typed fields, coercing numbers
//! - [`validator`] evaluates constraint chains per field
//! - [`normalizer`] converts blood glucose to mmol/L
//!
//! [`Pipeline`] runs all of them for a document. The [`dedup`] module binds
//! datasets to a deduplication strategy and stores their records.
//!
//! # Example
//!
//! ```
//! use devicedata::Pipeline;
//! use serde_json::json;
//!
//! let outcome = Pipeline::new().process(&json!({
//!     "type": "deviceEvent",
//!     "subType": "timeChange",
//!     "deviceId": "pump",
//!     "time": "2016-05-04T15:18:06Z",
//!     "change": {"from": "2016-05-04T08:18:06Z", "to": "2016-05-04T09:18:06", "agent": "manual"}
//! }));
//!
//! assert_eq!(outcome.errors.len(), 1);
//! assert_eq!(outcome.errors[0].pointer(), "/change/from");
//! ```

pub mod config;
pub mod context;
pub mod data;
pub mod dedup;
pub mod error;
pub mod normalizer;
pub mod reader;
pub mod validator;

mod pipeline;

pub use config::PipelineConfig;
pub use context::{ContextError, ErrorDetail, ErrorSink, Meta};
pub use data::{Datum, Kind, Record};
pub use error::{DataError, Result};
pub use pipeline::{Outcome, Pipeline};
