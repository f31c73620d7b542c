//! Canonicalization of unit-bearing fields.
//!
//! Blood glucose is stored in mmol/L. Values tagged with mg/dL are divided by
//! [`glucose::MMOL_L_TO_MG_DL`] and their units rewritten; values with no or
//! unrecognized units are left alone (validation reports those).

pub mod glucose;

use tracing::trace;

use crate::context::{Context, PathSegment};

use glucose::Units;

/// Normalizer bound to one location in the document.
#[derive(Debug, Clone)]
pub struct Normalizer<'s> {
    context: Context<'s>,
}

impl<'s> Normalizer<'s> {
    pub fn new(context: Context<'s>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Context<'s> {
        &self.context
    }

    pub fn descend(&self, segment: impl Into<PathSegment>) -> Normalizer<'s> {
        Normalizer::new(self.context.descend(segment))
    }

    /// Normalizer for blood glucose values expressed in `units`. `segment`
    /// names the units field and is only used for tracing.
    pub fn blood_glucose(
        &self,
        segment: impl Into<PathSegment>,
        units: Option<&str>,
    ) -> BloodGlucoseNormalizer {
        let segment = segment.into();
        let units = units.and_then(Units::parse);
        if units == Some(Units::MgDL) {
            trace!(pointer = %self.context.descend(segment).pointer(), "converting mg/dL to mmol/L");
        }
        BloodGlucoseNormalizer { units }
    }
}

/// Converts values and units of one blood glucose field group.
#[derive(Debug, Clone, Copy)]
pub struct BloodGlucoseNormalizer {
    units: Option<Units>,
}

impl BloodGlucoseNormalizer {
    /// The canonical value. Passes through unchanged for mmol/L or
    /// unrecognized units.
    pub fn value(&self, value: Option<f64>) -> Option<f64> {
        match self.units {
            Some(units) => value.map(|value| units.to_canonical(value)),
            None => value,
        }
    }

    /// The canonical units tag, or the original when unrecognized.
    pub fn units(&self, original: Option<String>) -> Option<String> {
        match self.units {
            Some(_) => Some(glucose::MMOL_L.to_string()),
            None => original,
        }
    }
}
