//! Record variants, their shared base and the dispatcher that picks one.
//!
//! A document is turned into a [`Datum`] in three steps, each reporting into
//! the same error sink:
//!
//! 1. [`dispatch`] reads the discriminant fields and picks a [`Kind`].
//! 2. [`Record::parse`] reads the variant's fields.
//! 3. [`Record::validate`] and [`Record::normalize`] check and canonicalize them.
//!
//! Dispatch failures stop the record; everything after it collects all
//! errors.

mod base;
mod datum;
pub mod errors;
mod kind;
mod registry;
pub mod types;

pub use base::{Base, TIMEZONE_OFFSET_MAXIMUM, TIMEZONE_OFFSET_MINIMUM};
pub use datum::{Datum, Record};
pub use kind::{Discriminant, Kind};
pub use registry::dispatch;
pub use types::basal::{ScheduledBasal, SuspendBasal, TemporaryBasal};
pub use types::bolus::{ComboBolus, ExtendedBolus, ExtendedPortion, NormalBolus, NormalPortion};
pub use types::calculator::{BolusCalculator, Recommended};
pub use types::device::{Calibration, Change, DeviceStatus, TimeChange};
pub use types::glucose::{ContinuousGlucose, GlucoseReading, GlucoseTarget, SelfMonitoredGlucose};
pub use types::settings::{
    BasalScheduleEntry, BloodGlucoseTarget, CarbRatio, InsulinSensitivity, PumpSettings, PumpUnits,
};
