//! Fields shared by every record variant.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::dedup::DeduplicatorDescriptor;
use crate::error::{DataError, Result};
use crate::reader::ObjectReader;
use crate::validator::{TimeLayout, Validator};

use super::kind::Kind;

/// Timezone and conversion offsets are minutes; a week either way.
pub const TIMEZONE_OFFSET_MINIMUM: i64 = -10080;
pub const TIMEZONE_OFFSET_MAXIMUM: i64 = 10080;

/// Common attributes of a record. Variants hold one and forward to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    #[serde(rename = "type")]
    pub datum_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_drift_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Map<String, Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,

    /// Dataset linkage, assigned by the caller and never read from the document.
    #[serde(rename = "_userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "uploadId", skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<String>,

    /// Set by the deduplicator that stored the record.
    #[serde(rename = "_deduplicator", skip_serializing_if = "Option::is_none")]
    pub deduplicator: Option<DeduplicatorDescriptor>,
    #[serde(rename = "_active")]
    pub active: bool,
}

impl Base {
    /// A base carrying the discriminants of `kind`.
    pub fn new(kind: Kind) -> Self {
        Self {
            datum_type: kind.datum_type().to_string(),
            sub_type: kind.sub_type().map(str::to_string),
            delivery_type: kind.delivery_type().map(str::to_string),
            ..Self::default()
        }
    }

    pub fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.device_id = reader.read_string("deviceId");
        self.time = reader.read_string("time");
        self.device_time = reader.read_string("deviceTime");
        self.timezone_offset = reader.read_integer("timezoneOffset");
        self.conversion_offset = reader.read_integer("conversionOffset");
        self.clock_drift_offset = reader.read_integer("clockDriftOffset");
        self.annotations = reader
            .read_object_array("annotations")
            .map(|annotations| {
                annotations
                    .into_iter()
                    .map(|annotation| annotation.cloned().unwrap_or_default())
                    .collect()
            });
        self.payload = reader.read_object("payload").cloned();
    }

    pub fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_string("deviceId", self.device_id.as_deref())
            .exists()
            .not_empty();
        validator
            .validate_string_as_time("time", self.time.as_deref(), TimeLayout::Rfc3339)
            .exists();
        validator.validate_string_as_time(
            "deviceTime",
            self.device_time.as_deref(),
            TimeLayout::Naive,
        );
        validator
            .validate_integer("timezoneOffset", self.timezone_offset)
            .in_range(TIMEZONE_OFFSET_MINIMUM, TIMEZONE_OFFSET_MAXIMUM);
        validator
            .validate_object_array("annotations", self.annotations.as_deref())
            .not_empty();
    }

    /// Fields that identify the record across uploads of the same device.
    pub fn identity_fields(&self) -> Result<Vec<String>> {
        let required = [
            ("userId", &self.user_id),
            ("deviceId", &self.device_id),
            ("time", &self.time),
        ];
        let mut fields = Vec::with_capacity(5);
        for (name, value) in required {
            match value {
                Some(value) if !value.is_empty() => fields.push(value.clone()),
                _ => return Err(DataError::IdentityIncomplete { field: name }),
            }
        }
        fields.push(self.datum_type.clone());
        fields.extend(self.sub_type.iter().cloned());
        fields.extend(self.delivery_type.iter().cloned());
        Ok(fields)
    }
}
