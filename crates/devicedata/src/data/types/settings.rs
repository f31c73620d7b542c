//! Pump configuration snapshots (`pumpSettings`).

use indexmap::IndexMap;
use serde::Serialize;

use crate::data::{Base, Kind, Record};
use crate::normalizer::glucose::{value_range, UNITS};
use crate::normalizer::Normalizer;
use crate::reader::ObjectReader;
use crate::validator::Validator;

use super::glucose::GlucoseTarget;
use super::{parse_object_array, validate_object_array};

/// Schedule entries start at an offset into the day, in milliseconds.
pub const START_MAXIMUM: i64 = 86_400_000;
pub const BASAL_RATE_MAXIMUM: f64 = 100.0;
pub const CARB_RATIO_MAXIMUM: f64 = 250.0;

fn validate_start(validator: &Validator<'_>, start: Option<i64>) {
    validator
        .validate_integer("start", start)
        .exists()
        .in_range(0, START_MAXIMUM);
}

/// Units the pump displays values in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PumpUnits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
}

impl PumpUnits {
    pub fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.carb = reader.read_string("carb");
        self.bg = reader.read_string("bg");
    }

    pub fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_string("carb", self.carb.as_deref())
            .exists()
            .length_greater_than_or_equal_to(1);
        validator
            .validate_string("bg", self.bg.as_deref())
            .exists()
            .one_of(&UNITS);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasalScheduleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
}

impl BasalScheduleEntry {
    fn parse(reader: &ObjectReader<'_, '_>) -> Self {
        Self {
            rate: reader.read_float("rate"),
            start: reader.read_integer("start"),
        }
    }

    fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_float("rate", self.rate)
            .exists()
            .in_range(0.0, BASAL_RATE_MAXIMUM);
        validate_start(validator, self.start);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BloodGlucoseTarget {
    #[serde(flatten)]
    pub target: GlucoseTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
}

impl BloodGlucoseTarget {
    fn parse(reader: &ObjectReader<'_, '_>) -> Self {
        let mut target = GlucoseTarget::default();
        target.parse(reader);
        Self {
            target,
            start: reader.read_integer("start"),
        }
    }

    fn validate(&self, validator: &Validator<'_>, units: Option<&str>) {
        self.target.validate(validator, units);
        validate_start(validator, self.start);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarbRatio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
}

impl CarbRatio {
    fn parse(reader: &ObjectReader<'_, '_>) -> Self {
        Self {
            amount: reader.read_float("amount"),
            start: reader.read_integer("start"),
        }
    }

    fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_float("amount", self.amount)
            .exists()
            .in_range(0.0, CARB_RATIO_MAXIMUM);
        validate_start(validator, self.start);
    }
}

/// Drop in blood glucose per unit of insulin, in the pump's glucose units.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsulinSensitivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
}

impl InsulinSensitivity {
    fn parse(reader: &ObjectReader<'_, '_>) -> Self {
        Self {
            amount: reader.read_float("amount"),
            start: reader.read_integer("start"),
        }
    }

    fn validate(&self, validator: &Validator<'_>, units: Option<&str>) {
        let amount = validator.validate_float("amount", self.amount).exists();
        if let Some((low, high)) = value_range(units) {
            amount.in_range(low, high);
        }
        validate_start(validator, self.start);
    }
}

type Entries<T> = Vec<Option<T>>;

/// `pumpSettings`: schedules, targets and ratios configured on a pump.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PumpSettings {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<PumpUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basal_schedules: Option<IndexMap<String, Entries<BasalScheduleEntry>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_target: Option<Entries<BloodGlucoseTarget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb_ratio: Option<Entries<CarbRatio>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_sensitivity: Option<Entries<InsulinSensitivity>>,
}

impl PumpSettings {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::PumpSettings),
            active_schedule: None,
            units: None,
            basal_schedules: None,
            bg_target: None,
            carb_ratio: None,
            insulin_sensitivity: None,
        }
    }

    fn bg_units(&self) -> Option<&str> {
        self.units.as_ref().and_then(|units| units.bg.as_deref())
    }
}

impl Default for PumpSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for PumpSettings {
    fn kind(&self) -> Kind {
        Kind::PumpSettings
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.base.parse(reader);
        self.active_schedule = reader.read_string("activeSchedule");

        let units = reader.object_reader("units");
        if units.object().is_some() {
            let mut parsed = PumpUnits::default();
            parsed.parse(&units);
            units.finish();
            self.units = Some(parsed);
        }

        let schedules = reader.object_reader("basalSchedules");
        if let Some(object) = schedules.object() {
            let parsed = object
                .keys()
                .filter_map(|name| {
                    parse_object_array(&schedules.array_reader(name), BasalScheduleEntry::parse)
                        .map(|entries| (name.clone(), entries))
                })
                .collect();
            schedules.finish();
            self.basal_schedules = Some(parsed);
        }

        self.bg_target = parse_object_array(&reader.array_reader("bgTarget"), BloodGlucoseTarget::parse);
        self.carb_ratio = parse_object_array(&reader.array_reader("carbRatio"), CarbRatio::parse);
        self.insulin_sensitivity = parse_object_array(
            &reader.array_reader("insulinSensitivity"),
            InsulinSensitivity::parse,
        );
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        validator
            .validate_string("activeSchedule", self.active_schedule.as_deref())
            .exists()
            .not_empty();

        validator.validate_exists("units", self.units.as_ref());
        if let Some(units) = &self.units {
            units.validate(&validator.descend("units"));
        }

        validator
            .validate_object("basalSchedules", self.basal_schedules.as_ref())
            .exists();
        if let Some(schedules) = &self.basal_schedules {
            let schedules_validator = validator.descend("basalSchedules");
            for (name, entries) in schedules {
                validate_object_array(
                    &schedules_validator,
                    name,
                    Some(entries.as_slice()),
                    BasalScheduleEntry::validate,
                );
            }
        }

        let bg_units = self.bg_units();
        validator
            .validate_object_array("bgTarget", self.bg_target.as_deref())
            .exists();
        validate_object_array(validator, "bgTarget", self.bg_target.as_deref(), |target, v| {
            target.validate(v, bg_units)
        });
        validator
            .validate_object_array("carbRatio", self.carb_ratio.as_deref())
            .exists();
        validate_object_array(
            validator,
            "carbRatio",
            self.carb_ratio.as_deref(),
            CarbRatio::validate,
        );
        validator
            .validate_object_array("insulinSensitivity", self.insulin_sensitivity.as_deref())
            .exists();
        validate_object_array(
            validator,
            "insulinSensitivity",
            self.insulin_sensitivity.as_deref(),
            |sensitivity, v| sensitivity.validate(v, bg_units),
        );
    }

    /// Glucose values are converted with the units they were entered in, so
    /// the units tag is rewritten last.
    fn normalize(&mut self, normalizer: &Normalizer<'_>) {
        let glucose = normalizer
            .descend("units")
            .blood_glucose("bg", self.bg_units());

        for target in self.bg_target.iter_mut().flatten().flatten() {
            target.target.normalize(&glucose);
        }
        for sensitivity in self.insulin_sensitivity.iter_mut().flatten().flatten() {
            sensitivity.amount = glucose.value(sensitivity.amount);
        }
        if let Some(units) = &mut self.units {
            units.bg = glucose.units(units.bg.take());
        }
    }
}
