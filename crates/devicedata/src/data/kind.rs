//! The closed set of record variants and their discriminants.

use std::fmt;

use crate::context::Meta;

/// Which secondary field, if any, selects the variant within a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discriminant {
    SubType,
    DeliveryType,
}

impl Discriminant {
    pub fn field(&self) -> &'static str {
        match self {
            Self::SubType => "subType",
            Self::DeliveryType => "deliveryType",
        }
    }
}

/// Every record variant the dispatcher can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    ScheduledBasal,
    TemporaryBasal,
    SuspendBasal,
    NormalBolus,
    ExtendedBolus,
    ComboBolus,
    ContinuousGlucose,
    SelfMonitoredGlucose,
    DeviceStatus,
    TimeChange,
    Calibration,
    PumpSettings,
    BolusCalculator,
}

impl Kind {
    pub const ALL: [Kind; 13] = [
        Kind::ScheduledBasal,
        Kind::TemporaryBasal,
        Kind::SuspendBasal,
        Kind::NormalBolus,
        Kind::ExtendedBolus,
        Kind::ComboBolus,
        Kind::ContinuousGlucose,
        Kind::SelfMonitoredGlucose,
        Kind::DeviceStatus,
        Kind::TimeChange,
        Kind::Calibration,
        Kind::PumpSettings,
        Kind::BolusCalculator,
    ];

    /// Value of the `type` field.
    pub fn datum_type(&self) -> &'static str {
        match self {
            Self::ScheduledBasal | Self::TemporaryBasal | Self::SuspendBasal => "basal",
            Self::NormalBolus | Self::ExtendedBolus | Self::ComboBolus => "bolus",
            Self::ContinuousGlucose => "cbg",
            Self::SelfMonitoredGlucose => "smbg",
            Self::DeviceStatus | Self::TimeChange | Self::Calibration => "deviceEvent",
            Self::PumpSettings => "pumpSettings",
            Self::BolusCalculator => "wizard",
        }
    }

    /// The secondary discriminant field and the value selecting this kind.
    pub fn secondary(&self) -> Option<(Discriminant, &'static str)> {
        match self {
            Self::ScheduledBasal => Some((Discriminant::DeliveryType, "scheduled")),
            Self::TemporaryBasal => Some((Discriminant::DeliveryType, "temp")),
            Self::SuspendBasal => Some((Discriminant::DeliveryType, "suspend")),
            Self::NormalBolus => Some((Discriminant::SubType, "normal")),
            Self::ExtendedBolus => Some((Discriminant::SubType, "square")),
            Self::ComboBolus => Some((Discriminant::SubType, "dual/square")),
            Self::DeviceStatus => Some((Discriminant::SubType, "status")),
            Self::TimeChange => Some((Discriminant::SubType, "timeChange")),
            Self::Calibration => Some((Discriminant::SubType, "calibration")),
            Self::ContinuousGlucose
            | Self::SelfMonitoredGlucose
            | Self::PumpSettings
            | Self::BolusCalculator => None,
        }
    }

    pub fn sub_type(&self) -> Option<&'static str> {
        match self.secondary() {
            Some((Discriminant::SubType, value)) => Some(value),
            _ => None,
        }
    }

    pub fn delivery_type(&self) -> Option<&'static str> {
        match self.secondary() {
            Some((Discriminant::DeliveryType, value)) => Some(value),
            _ => None,
        }
    }

    /// Error meta for records of this kind.
    pub fn meta(&self) -> Meta {
        let mut meta = Meta::new(self.datum_type());
        if let Some(sub_type) = self.sub_type() {
            meta = meta.with_sub_type(sub_type);
        }
        if let Some(delivery_type) = self.delivery_type() {
            meta = meta.with_delivery_type(delivery_type);
        }
        meta
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary() {
            Some((_, value)) => write!(f, "{}/{}", self.datum_type(), value),
            None => f.write_str(self.datum_type()),
        }
    }
}
