//! Blood glucose readings: continuous (`cbg`) and fingerstick (`smbg`).

use serde::Serialize;

use crate::data::{Base, Kind, Record};
use crate::error::{DataError, Result};
use crate::normalizer::glucose::{value_range, UNITS};
use crate::normalizer::{BloodGlucoseNormalizer, Normalizer};
use crate::reader::ObjectReader;
use crate::validator::Validator;

/// A blood glucose value with its units.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlucoseReading {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl GlucoseReading {
    pub fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.value = reader.read_float("value");
        self.units = reader.read_string("units");
    }

    pub fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_string("units", self.units.as_deref())
            .exists()
            .one_of(&UNITS);
        let value = validator.validate_float("value", self.value).exists();
        if let Some((low, high)) = value_range(self.units.as_deref()) {
            value.in_range(low, high);
        }
    }

    pub fn normalize(&mut self, normalizer: &Normalizer<'_>) {
        let glucose = normalizer.blood_glucose("units", self.units.as_deref());
        self.value = glucose.value(self.value);
        self.units = glucose.units(self.units.take());
    }

    pub fn identity_fields(&self) -> Result<Vec<String>> {
        let value = self
            .value
            .ok_or(DataError::IdentityIncomplete { field: "value" })?;
        let units = self
            .units
            .clone()
            .ok_or(DataError::IdentityIncomplete { field: "units" })?;
        Ok(vec![value.to_string(), units])
    }
}

/// Glucose target bounds, as found in pump settings and calculator records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlucoseTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl GlucoseTarget {
    pub fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.target = reader.read_float("target");
        self.range = reader.read_float("range");
        self.low = reader.read_float("low");
        self.high = reader.read_float("high");
    }

    /// Bounds are checked against the range of `units` when it is known.
    pub fn validate(&self, validator: &Validator<'_>, units: Option<&str>) {
        let Some((low, high)) = value_range(units) else {
            return;
        };
        validator.validate_float("target", self.target).in_range(low, high);
        validator.validate_float("range", self.range).in_range(low, high);
        validator.validate_float("low", self.low).in_range(low, high);
        let high_chain = validator.validate_float("high", self.high).in_range(low, high);
        if let Some(target_low) = self.low {
            high_chain.greater_than_or_equal_to(target_low);
        }
    }

    pub fn normalize(&mut self, glucose: &BloodGlucoseNormalizer) {
        self.target = glucose.value(self.target);
        self.range = glucose.value(self.range);
        self.low = glucose.value(self.low);
        self.high = glucose.value(self.high);
    }
}

/// `cbg`: a continuous glucose monitor sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuousGlucose {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub reading: GlucoseReading,
}

impl ContinuousGlucose {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::ContinuousGlucose),
            reading: GlucoseReading::default(),
        }
    }
}

impl Default for ContinuousGlucose {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for ContinuousGlucose {
    fn kind(&self) -> Kind {
        Kind::ContinuousGlucose
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

pub const SMBG_SUB_TYPES: [&str; 2] = ["manual", "linked"];

/// `smbg`: a self-monitored (meter) reading. Its `subType` is a plain field,
/// not a discriminant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfMonitoredGlucose {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub reading: GlucoseReading,
    #[serde(rename = "subType", skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

impl SelfMonitoredGlucose {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::SelfMonitoredGlucose),
            reading: GlucoseReading::default(),
            sub_type: None,
        }
    }
}

impl Default for SelfMonitoredGlucose {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for SelfMonitoredGlucose {
    fn kind(&self) -> Kind {
        Kind::SelfMonitoredGlucose
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
        self.sub_type = reader.read_string("subType");
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        self.reading.validate(validator);
        validator
            .validate_string("subType", self.sub_type.as_deref())
            .one_of(&SMBG_SUB_TYPES);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, ErrorSink};
    use serde_json::json;

    fn reading(value: f64, units: &str) -> GlucoseReading {
        GlucoseReading {
            value: Some(value),
            units: Some(units.to_string()),
        }
    }

    fn validate(reading: &GlucoseReading) -> Vec<String> {
        let sink = ErrorSink::new();
        reading.validate(&Validator::new(Context::new(&sink)));
        sink.errors().iter().map(|e| format!("{} {}", e.pointer(), e.code())).collect()
    }

    #[test]
    fn test_value_range_depends_on_units() {
        assert!(validate(&reading(55.0, "mmol/L")).is_empty());
        assert_eq!(validate(&reading(55.1, "mmol/l")), vec!["/value value-not-in-range"]);
        assert!(validate(&reading(1000.0, "mg/dL")).is_empty());
        assert_eq!(validate(&reading(-1.0, "mg/dl")), vec!["/value value-not-in-range"]);
    }

    #[test]
    fn test_unknown_units_skip_range() {
        assert_eq!(validate(&reading(5000.0, "")), vec!["/units value-not-one-of"]);
    }

    #[test]
    fn test_target_high_not_below_low() {
        let sink = ErrorSink::new();
        let target = GlucoseTarget {
            low: Some(6.0),
            high: Some(5.0),
            ..GlucoseTarget::default()
        };
        target.validate(&Validator::new(Context::new(&sink)), Some("mmol/L"));

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer(), "/high");
    }

    #[test]
    fn test_smbg_round_trip_through_record() {
        let sink = ErrorSink::new();
        let doc = json!({
            "deviceId": "meter",
            "time": "2016-05-04T15:18:06Z",
            "value": 120,
            "units": "mg/dL",
            "subType": "scanned"
        });
        let mut smbg = SelfMonitoredGlucose::new();
        smbg.parse(&ObjectReader::new(Context::new(&sink), doc.as_object()));
        smbg.validate(&Validator::new(Context::new(&sink)));
        smbg.normalize(&Normalizer::new(Context::new(&sink)));

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer(), "/subType");
        assert_eq!(smbg.reading.units.as_deref(), Some("mmol/L"));
        assert_eq!(smbg.reading.value, Some(120.0 / 18.01559));
    }
}
