//! Blood glucose units and their canonical conversion.

pub const MMOL_L: &str = "mmol/L";
pub const MMOL_L_LOWER: &str = "mmol/l";
pub const MG_DL: &str = "mg/dL";
pub const MG_DL_LOWER: &str = "mg/dl";

/// Every spelling accepted for a blood glucose `units` field.
pub const UNITS: [&str; 4] = [MMOL_L_LOWER, MMOL_L, MG_DL_LOWER, MG_DL];

/// Divisor from mg/dL to mmol/L, from the molar mass of glucose.
pub const MMOL_L_TO_MG_DL: f64 = 18.01559;

pub const MMOL_L_LOWER_LIMIT: f64 = 0.0;
pub const MMOL_L_UPPER_LIMIT: f64 = 55.0;
pub const MG_DL_LOWER_LIMIT: f64 = 0.0;
pub const MG_DL_UPPER_LIMIT: f64 = 1000.0;

/// Unit family of a blood glucose value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    MmolL,
    MgDL,
}

impl Units {
    /// Case-insensitive match on the accepted spellings.
    pub fn parse(units: &str) -> Option<Self> {
        if units.eq_ignore_ascii_case(MMOL_L) {
            Some(Self::MmolL)
        } else if units.eq_ignore_ascii_case(MG_DL) {
            Some(Self::MgDL)
        } else {
            None
        }
    }

    /// Inclusive bounds for a plausible value in these units.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::MmolL => (MMOL_L_LOWER_LIMIT, MMOL_L_UPPER_LIMIT),
            Self::MgDL => (MG_DL_LOWER_LIMIT, MG_DL_UPPER_LIMIT),
        }
    }

    /// Convert a value in these units to mmol/L. No rounding is applied.
    pub fn to_canonical(&self, value: f64) -> f64 {
        match self {
            Self::MmolL => value,
            Self::MgDL => value / MMOL_L_TO_MG_DL,
        }
    }
}

/// Value range for the given units, if they are recognized.
pub fn value_range(units: Option<&str>) -> Option<(f64, f64)> {
    units.and_then(Units::parse).map(|units| units.range())
}
