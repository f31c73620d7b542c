//! Basal insulin delivery, selected by `deliveryType`.

use serde::Serialize;

use crate::data::{Base, Kind, Record};
use crate::reader::ObjectReader;
use crate::validator::Validator;

pub const RATE_MAXIMUM: f64 = 20.0;
/// Five days, in milliseconds.
pub const SCHEDULED_DURATION_MAXIMUM: i64 = 432_000_000;
/// One day, in milliseconds.
pub const TEMPORARY_DURATION_MAXIMUM: i64 = 86_400_000;
/// One week, in milliseconds.
pub const SUSPEND_DURATION_MAXIMUM: i64 = 604_800_000;
pub const PERCENT_MAXIMUM: f64 = 10.0;

/// `basal`/`scheduled`: delivery following the active schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledBasal {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_name: Option<String>,
}

impl ScheduledBasal {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::ScheduledBasal),
            duration: None,
            rate: None,
            schedule_name: None,
        }
    }
}

impl Default for ScheduledBasal {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for ScheduledBasal {
    fn kind(&self) -> Kind {
        Kind::ScheduledBasal
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
        self.rate = reader.read_float("rate");
        self.schedule_name = reader.read_string("scheduleName");
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        validator
            .validate_integer("duration", self.duration)
            .exists()
            .in_range(0, SCHEDULED_DURATION_MAXIMUM);
        validator
            .validate_float("rate", self.rate)
            .exists()
            .in_range(0.0, RATE_MAXIMUM);
        validator
            .validate_string("scheduleName", self.schedule_name.as_deref())
            .length_greater_than(1);
    }
}

/// `basal`/`temp`: a temporary override, as an absolute rate or a percent of
/// the scheduled rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryBasal {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

impl TemporaryBasal {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::TemporaryBasal),
            duration: None,
            expected_duration: None,
            rate: None,
            percent: None,
        }
    }
}

impl Default for TemporaryBasal {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for TemporaryBasal {
    fn kind(&self) -> Kind {
        Kind::TemporaryBasal
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
        self.expected_duration = reader.read_integer("expectedDuration");
        self.rate = reader.read_float("rate");
        self.percent = reader.read_float("percent");
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        validator
            .validate_integer("duration", self.duration)
            .exists()
            .in_range(0, TEMPORARY_DURATION_MAXIMUM);
        validator
            .validate_integer("expectedDuration", self.expected_duration)
            .in_range(self.duration.unwrap_or(0), TEMPORARY_DURATION_MAXIMUM);
        validator
            .validate_float("rate", self.rate)
            .in_range(0.0, RATE_MAXIMUM);
        validator
            .validate_float("percent", self.percent)
            .in_range(0.0, PERCENT_MAXIMUM);
    }
}

/// `basal`/`suspend`: delivery stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendBasal {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<i64>,
}

impl SuspendBasal {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::SuspendBasal),
            duration: None,
            expected_duration: None,
        }
    }
}

impl Default for SuspendBasal {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for SuspendBasal {
    fn kind(&self) -> Kind {
        Kind::SuspendBasal
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
        self.expected_duration = reader.read_integer("expectedDuration");
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        validator
            .validate_integer("duration", self.duration)
            .exists()
            .in_range(0, SUSPEND_DURATION_MAXIMUM);
        validator
            .validate_integer("expectedDuration", self.expected_duration)
            .in_range(self.duration.unwrap_or(0), SUSPEND_DURATION_MAXIMUM);
    }
}
