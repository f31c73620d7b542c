//! Structured error details reported while reading and validating records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminant context of the record an error belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Record type (`type`).
    #[serde(rename = "type")]
    pub datum_type: String,
    /// Secondary discriminant (`subType`), when the family has one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sub_type: Option<String>,
    /// Secondary discriminant (`deliveryType`), when the family has one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delivery_type: Option<String>,
}

impl Meta {
    /// Meta for a record with only a primary discriminant.
    pub fn new(datum_type: impl Into<String>) -> Self {
        Self {
            datum_type: datum_type.into(),
            sub_type: None,
            delivery_type: None,
        }
    }

    /// Set the sub type.
    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    /// Set the delivery type.
    pub fn with_delivery_type(mut self, delivery_type: impl Into<String>) -> Self {
        self.delivery_type = Some(delivery_type.into());
        self
    }
}

/// A single violation: a stable `(code, title)` pair plus a human-readable detail.
///
/// Codes and titles are part of the public contract and must not change once
/// released. Only `detail` carries interpolated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meta: Option<Meta>,
}

impl ErrorDetail {
    /// Create a detail without meta.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            detail: detail.into(),
            meta: None,
        }
    }

    /// Attach record meta.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.detail)
    }
}

/// Location of an error inside the submitted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// Slash-delimited pointer from the record root, e.g. `/change/from`.
    pub pointer: String,
}

/// An error detail paired with the location it was found at.
///
/// Serializes in the JSON:API error object shape:
/// `{"code", "title", "detail", "source": {"pointer"}, "meta"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextError {
    #[serde(flatten)]
    pub detail: ErrorDetail,
    pub source: ErrorSource,
}

impl ContextError {
    pub fn new(pointer: impl Into<String>, detail: ErrorDetail) -> Self {
        Self {
            detail,
            source: ErrorSource {
                pointer: pointer.into(),
            },
        }
    }

    pub fn pointer(&self) -> &str {
        &self.source.pointer
    }

    pub fn code(&self) -> &str {
        &self.detail.code
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}'", self.detail, self.source.pointer)
    }
}
