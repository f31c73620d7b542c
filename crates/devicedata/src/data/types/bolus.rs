//! Bolus insulin delivery, selected by `subType`.
//!
//! A combo bolus is a normal portion plus an extended portion; both portions
//! are shared with the single-portion variants.

use serde::Serialize;

use crate::data::{Base, Kind, Record};
use crate::reader::ObjectReader;
use crate::validator::Validator;

pub const AMOUNT_MAXIMUM: f64 = 100.0;
/// One day, in milliseconds.
pub const DURATION_MAXIMUM: i64 = 86_400_000;

/// Immediately delivered insulin.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalPortion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_normal: Option<f64>,
}

impl NormalPortion {
    pub fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.normal = reader.read_float("normal");
        self.expected_normal = reader.read_float("expectedNormal");
    }

    pub fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_float("normal", self.normal)
            .exists()
            .in_range(0.0, AMOUNT_MAXIMUM);
        validator
            .validate_float("expectedNormal", self.expected_normal)
            .in_range(self.normal.unwrap_or(0.0), AMOUNT_MAXIMUM);
    }
}

/// Insulin delivered over a duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedPortion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_extended: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<i64>,
}

impl ExtendedPortion {
    pub fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.extended = reader.read_float("extended");
        self.expected_extended = reader.read_float("expectedExtended");
        self.duration = reader.read_integer("duration");
        self.expected_duration = reader.read_integer("expectedDuration");
    }

    pub fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_float("extended", self.extended)
            .exists()
            .in_range(0.0, AMOUNT_MAXIMUM);
        validator
            .validate_float("expectedExtended", self.expected_extended)
            .in_range(self.extended.unwrap_or(0.0), AMOUNT_MAXIMUM);
        validator
            .validate_integer("duration", self.duration)
            .exists()
            .in_range(0, DURATION_MAXIMUM);
        validator
            .validate_integer("expectedDuration", self.expected_duration)
            .in_range(self.duration.unwrap_or(0), DURATION_MAXIMUM);
    }
}

/// `bolus`/`normal`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalBolus {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub normal: NormalPortion,
}

impl NormalBolus {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::NormalBolus),
            normal: NormalPortion::default(),
        }
    }
}

impl Default for NormalBolus {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for NormalBolus {
    fn kind(&self) -> Kind {
        Kind::NormalBolus
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.base.parse(reader);
        self.normal.parse(reader);
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        self.normal.validate(validator);
    }
}

/// `bolus`/`square`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedBolus {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub extended: ExtendedPortion,
}

impl ExtendedBolus {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::ExtendedBolus),
            extended: ExtendedPortion::default(),
        }
    }
}

impl Default for ExtendedBolus {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for ExtendedBolus {
    fn kind(&self) -> Kind {
        Kind::ExtendedBolus
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.base.parse(reader);
        self.extended.parse(reader);
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        self.extended.validate(validator);
    }
}

/// `bolus`/`dual/square`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboBolus {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub normal: NormalPortion,
    #[serde(flatten)]
    pub extended: ExtendedPortion,
}

impl ComboBolus {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::ComboBolus),
            normal: NormalPortion::default(),
            extended: ExtendedPortion::default(),
        }
    }
}

impl Default for ComboBolus {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for ComboBolus {
    fn kind(&self) -> Kind {
        Kind::ComboBolus
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.base.parse(reader);
        self.normal.parse(reader);
        self.extended.parse(reader);
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        self.normal.validate(validator);
        self.extended.validate(validator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, ErrorSink};
    use serde_json::json;

    #[test]
    fn test_combo_validates_both_portions() {
        let sink = ErrorSink::new();
        let doc = json!({
            "deviceId": "pump",
            "time": "2016-05-04T15:18:06Z",
            "normal": 101.0,
            "extended": 1.5,
            "duration": -1
        });
        let mut bolus = ComboBolus::new();
        bolus.parse(&ObjectReader::new(Context::new(&sink), doc.as_object()));
        bolus.validate(&Validator::new(Context::new(&sink)));

        let pointers: Vec<_> = sink.errors().iter().map(|e| e.pointer().to_string()).collect();
        assert_eq!(pointers, vec!["/normal", "/duration"]);
    }

    #[test]
    fn test_combo_serializes_flat() {
        let mut bolus = ComboBolus::new();
        bolus.normal.normal = Some(1.0);
        bolus.extended.extended = Some(2.0);
        bolus.extended.duration = Some(3_600_000);

        let value = serde_json::to_value(&bolus).unwrap();
        assert_eq!(value["subType"], "dual/square");
        assert_eq!(value["normal"], 1.0);
        assert_eq!(value["extended"], 2.0);
        assert_eq!(value["duration"], 3_600_000);
    }
}
