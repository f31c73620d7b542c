//! Bolus calculator (`wizard`) records.

use serde::Serialize;

use crate::data::{Base, Kind, Record};
use crate::normalizer::glucose::{value_range, UNITS};
use crate::normalizer::Normalizer;
use crate::reader::ObjectReader;
use crate::validator::Validator;

use super::glucose::GlucoseTarget;

pub const CARB_INPUT_MAXIMUM: i64 = 1000;
pub const INSULIN_MAXIMUM: f64 = 250.0;
pub const RECOMMENDED_MAXIMUM: f64 = 100.0;

/// Insulin amounts the calculator suggested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommended {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<f64>,
}

impl Recommended {
    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.carb = reader.read_float("carb");
        self.correction = reader.read_float("correction");
        self.net = reader.read_float("net");
    }

    fn validate(&self, validator: &Validator<'_>) {
        validator
            .validate_float("carb", self.carb)
            .exists()
            .in_range(0.0, RECOMMENDED_MAXIMUM);
        validator
            .validate_float("correction", self.correction)
            .in_range(-RECOMMENDED_MAXIMUM, RECOMMENDED_MAXIMUM);
        validator
            .validate_float("net", self.net)
            .exists()
            .in_range(-RECOMMENDED_MAXIMUM, RECOMMENDED_MAXIMUM);
    }
}

/// `wizard`: inputs and outputs of one bolus calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BolusCalculator {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_input: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_target: Option<GlucoseTarget>,
    /// Identifier of the bolus record delivered from this calculation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bolus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb_input: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_carb_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_on_board: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_sensitivity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<Recommended>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl BolusCalculator {
    pub fn new() -> Self {
        Self {
            base: Base::new(Kind::BolusCalculator),
            bg_input: None,
            bg_target: None,
            bolus: None,
            carb_input: None,
            insulin_carb_ratio: None,
            insulin_on_board: None,
            insulin_sensitivity: None,
            recommended: None,
            units: None,
        }
    }
}

impl Default for BolusCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for BolusCalculator {
    fn kind(&self) -> Kind {
        Kind::BolusCalculator
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.base.parse(reader);
        self.bg_input = reader.read_float("bgInput");
        self.bolus = reader.read_string("bolus");
        self.carb_input = reader.read_integer("carbInput");
        self.insulin_carb_ratio = reader.read_float("insulinCarbRatio");
        self.insulin_on_board = reader.read_float("insulinOnBoard");
        self.insulin_sensitivity = reader.read_float("insulinSensitivity");
        self.units = reader.read_string("units");

        let target = reader.object_reader("bgTarget");
        if target.object().is_some() {
            let mut parsed = GlucoseTarget::default();
            parsed.parse(&target);
            target.finish();
            self.bg_target = Some(parsed);
        }

        let recommended = reader.object_reader("recommended");
        if recommended.object().is_some() {
            let mut parsed = Recommended::default();
            parsed.parse(&recommended);
            recommended.finish();
            self.recommended = Some(parsed);
        }
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.base.validate(validator);
        validator
            .validate_string("units", self.units.as_deref())
            .exists()
            .one_of(&UNITS);

        let range = value_range(self.units.as_deref());
        let bg_input = validator.validate_float("bgInput", self.bg_input);
        let insulin_sensitivity = validator.validate_float("insulinSensitivity", self.insulin_sensitivity);
        if let Some((low, high)) = range {
            bg_input.in_range(low, high);
            insulin_sensitivity.in_range(low, high);
        }
        if let Some(target) = &self.bg_target {
            target.validate(&validator.descend("bgTarget"), self.units.as_deref());
        }

        validator
            .validate_integer("carbInput", self.carb_input)
            .in_range(0, CARB_INPUT_MAXIMUM);
        validator
            .validate_float("insulinCarbRatio", self.insulin_carb_ratio)
            .in_range(0.0, INSULIN_MAXIMUM);
        validator
            .validate_float("insulinOnBoard", self.insulin_on_board)
            .in_range(0.0, INSULIN_MAXIMUM);
        validator
            .validate_string("bolus", self.bolus.as_deref())
            .not_empty();

        validator.validate_exists("recommended", self.recommended.as_ref());
        if let Some(recommended) = &self.recommended {
            recommended.validate(&validator.descend("recommended"));
        }
    }

    fn normalize(&mut self, normalizer: &Normalizer<'_>) {
        let glucose = normalizer.blood_glucose("units", self.units.as_deref());
        self.bg_input = glucose.value(self.bg_input);
        self.insulin_sensitivity = glucose.value(self.insulin_sensitivity);
        if let Some(target) = &mut self.bg_target {
            target.normalize(&glucose);
        }
        self.units = glucose.units(self.units.take());
    }
}
