//! The record trait and the tagged union over every variant.

use serde::Serialize;

use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::reader::ObjectReader;
use crate::validator::Validator;

use super::base::Base;
use super::kind::Kind;
use super::types::basal::{ScheduledBasal, SuspendBasal, TemporaryBasal};
use super::types::bolus::{ComboBolus, ExtendedBolus, NormalBolus};
use super::types::calculator::BolusCalculator;
use super::types::device::{Calibration, DeviceStatus, TimeChange};
use super::types::glucose::{ContinuousGlucose, SelfMonitoredGlucose};
use super::types::settings::PumpSettings;

/// Parse, validate and normalize behaviour shared by every record variant.
pub trait Record {
    fn kind(&self) -> Kind;

    fn base(&self) -> &Base;

    fn base_mut(&mut self) -> &mut Base;

    /// Read this variant's fields, reporting structural errors.
    fn parse(&mut self, reader: &ObjectReader<'_, '_>);

    /// Check field constraints, reporting every violation.
    fn validate(&self, validator: &Validator<'_>);

    /// Rewrite unit-bearing fields into canonical units.
    fn normalize(&mut self, _normalizer: &Normalizer<'_>) {}

    /// Values that identify the record for hash based deduplication.
    fn identity_fields(&self) -> Result<Vec<String>> {
        self.base().identity_fields()
    }
}

/// A dispatched record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    ScheduledBasal(ScheduledBasal),
    TemporaryBasal(TemporaryBasal),
    SuspendBasal(SuspendBasal),
    NormalBolus(NormalBolus),
    ExtendedBolus(ExtendedBolus),
    ComboBolus(ComboBolus),
    ContinuousGlucose(ContinuousGlucose),
    SelfMonitoredGlucose(SelfMonitoredGlucose),
    DeviceStatus(DeviceStatus),
    TimeChange(TimeChange),
    Calibration(Calibration),
    PumpSettings(PumpSettings),
    BolusCalculator(BolusCalculator),
}

impl Datum {
    /// An empty record of `kind`, with its discriminants already set.
    pub fn new(kind: Kind) -> Self {
        match kind {
            Kind::ScheduledBasal => Self::ScheduledBasal(ScheduledBasal::new()),
            Kind::TemporaryBasal => Self::TemporaryBasal(TemporaryBasal::new()),
            Kind::SuspendBasal => Self::SuspendBasal(SuspendBasal::new()),
            Kind::NormalBolus => Self::NormalBolus(NormalBolus::new()),
            Kind::ExtendedBolus => Self::ExtendedBolus(ExtendedBolus::new()),
            Kind::ComboBolus => Self::ComboBolus(ComboBolus::new()),
            Kind::ContinuousGlucose => Self::ContinuousGlucose(ContinuousGlucose::new()),
            Kind::SelfMonitoredGlucose => Self::SelfMonitoredGlucose(SelfMonitoredGlucose::new()),
            Kind::DeviceStatus => Self::DeviceStatus(DeviceStatus::new()),
            Kind::TimeChange => Self::TimeChange(TimeChange::new()),
            Kind::Calibration => Self::Calibration(Calibration::new()),
            Kind::PumpSettings => Self::PumpSettings(PumpSettings::new()),
            Kind::BolusCalculator => Self::BolusCalculator(BolusCalculator::new()),
        }
    }

    fn record(&self) -> &dyn Record {
        match self {
            Self::ScheduledBasal(record) => record,
            Self::TemporaryBasal(record) => record,
            Self::SuspendBasal(record) => record,
            Self::NormalBolus(record) => record,
            Self::ExtendedBolus(record) => record,
            Self::ComboBolus(record) => record,
            Self::ContinuousGlucose(record) => record,
            Self::SelfMonitoredGlucose(record) => record,
            Self::DeviceStatus(record) => record,
            Self::TimeChange(record) => record,
            Self::Calibration(record) => record,
            Self::PumpSettings(record) => record,
            Self::BolusCalculator(record) => record,
        }
    }

    fn record_mut(&mut self) -> &mut dyn Record {
        match self {
            Self::ScheduledBasal(record) => record,
            Self::TemporaryBasal(record) => record,
            Self::SuspendBasal(record) => record,
            Self::NormalBolus(record) => record,
            Self::ExtendedBolus(record) => record,
            Self::ComboBolus(record) => record,
            Self::ContinuousGlucose(record) => record,
            Self::SelfMonitoredGlucose(record) => record,
            Self::DeviceStatus(record) => record,
            Self::TimeChange(record) => record,
            Self::Calibration(record) => record,
            Self::PumpSettings(record) => record,
            Self::BolusCalculator(record) => record,
        }
    }
}

impl Record for Datum {
    fn kind(&self) -> Kind {
        self.record().kind()
    }

    fn base(&self) -> &Base {
        self.record().base()
    }

    fn base_mut(&mut self) -> &mut Base {
        self.record_mut().base_mut()
    }

    fn parse(&mut self, reader: &ObjectReader<'_, '_>) {
        self.record_mut().parse(reader);
    }

    fn validate(&self, validator: &Validator<'_>) {
        self.record().validate(validator);
    }

    fn normalize(&mut self, normalizer: &Normalizer<'_>) {
        self.record_mut().normalize(normalizer);
    }

    fn identity_fields(&self) -> Result<Vec<String>> {
        self.record().identity_fields()
    }
}
