//! Device events, selected by `subType`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::data::{Base, Kind, Record};
use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::reader::ObjectReader;
use crate::validator::{TimeLayout, Validator};

use super::glucose::GlucoseReading;

pub const STATUSES: [&str; 2] = ["resumed", "suspended"];
pub const CHANGE_AGENTS: [&str; 2] = ["manual", "automatic"];

/// `deviceEvent`/`status`: delivery suspended or resumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceStatus {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Map<String, Value>>,
}

impl DeviceStatus {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::DeviceStatus),
            status: None,
            duration: None,
            reason: None,
        }
    }
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for DeviceStatus {
    fn kind(&self) -> Kind {
        Kind::DeviceStatus
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.base.parse(reader);
        self.duration = reader.read_integer("duration");
        self.status = reader.read_string("status");
        self.reason = reader.read_object("reason").cloned();
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        // Some pumps omit the duration of a suspend, so it is optional.
        validator
            .validate_integer("duration", self.duration)
            .greater_than_or_equal_to(0);
        validator
            .validate_string("status", self.status.as_deref())
            .exists()
            .one_of(&STATUSES);
        validator
            .validate_object("reason", self.reason.as_ref())
            .exists();
    }
}

/// The `change` object of a time change event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Change {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

impl Change {
    pub fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.from = reader.read_string("from");
        self.to = reader.read_string("to");
        self.agent = reader.read_string("agent");
    }

    pub fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_string_as_time("from", self.from.as_deref(), TimeLayout::Naive)
            .exists();
        validator
            .validate_string_as_time("to", self.to.as_deref(), TimeLayout::Naive)
            .exists();
        validator
            .validate_string("agent", self.agent.as_deref())
            .exists()
            .one_of(&CHANGE_AGENTS);
    }
}

/// `deviceEvent`/`timeChange`: the device clock was changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeChange {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Change>,
}

impl TimeChange {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::TimeChange),
            change: None,
        }
    }
}

impl Default for TimeChange {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for TimeChange {
    fn kind(&self) -> Kind {
        Kind::TimeChange
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.base.parse(reader);
        let change_reader = reader.object_reader("change");
        if change_reader.object().is_some() {
            let mut change = Change::default();
            change.parse(&change_reader);
            change_reader.finish();
            self.change = Some(change);
        }
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        validator.validate_exists("change", self.change.as_ref());
        if let Some(change) = &self.change {
            change.validate(&validator.descend("change"));
        }
    }
}

/// `deviceEvent`/`calibration`: a meter value entered into a CGM.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calibration {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub reading: GlucoseReading,
}

impl Calibration {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::Calibration),
            reading: GlucoseReading::default(),
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for Calibration {
    fn kind(&self) -> Kind {
        Kind::Calibration
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.base.parse(reader);
        self.reading.parse(reader);
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        self.reading.validate(validator);
    }

    fn normalize(&mut self, normalizer: &Normalizer<'_>) {
        self.reading.normalize(normalizer);
    }

    fn identity_fields(&self) -> Result<Vec<String>> {
        let mut fields = self.base.identity_fields()?;
        fields.extend(self.reading.identity_fields()?);
        Ok(fields)
    }
}
