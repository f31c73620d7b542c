//! Selects the record variant for a document from its discriminant fields.

use tracing::debug;

use crate::context::ErrorDetail;
use crate::reader::ObjectReader;

use super::errors;
use super::kind::{Discriminant, Kind};

/// Read `type` and, for families that branch further, `subType` or
/// `deliveryType`, and return the matching kind.
///
/// A missing or unrecognized discriminant is reported at its own path and
/// yields `None`; the record must not be parsed any further.
pub fn dispatch(reader: &ObjectReader<'_, '_>) -> Option<Kind> {
    let datum_type = read_discriminant(reader, "type")?;
    match datum_type.as_str() {
        "basal" => secondary(reader, Discriminant::DeliveryType, |value| match value {
            "scheduled" => Some(Kind::ScheduledBasal),
            "temp" => Some(Kind::TemporaryBasal),
            "suspend" => Some(Kind::SuspendBasal),
            _ => None,
        }),
        "bolus" => secondary(reader, Discriminant::SubType, |value| match value {
            "normal" => Some(Kind::NormalBolus),
            "square" => Some(Kind::ExtendedBolus),
            "dual/square" => Some(Kind::ComboBolus),
            _ => None,
        }),
        "cbg" => Some(Kind::ContinuousGlucose),
        "smbg" => Some(Kind::SelfMonitoredGlucose),
        "deviceEvent" => secondary(reader, Discriminant::SubType, |value| match value {
            "status" => Some(Kind::DeviceStatus),
            "timeChange" => Some(Kind::TimeChange),
            "calibration" => Some(Kind::Calibration),
            _ => None,
        }),
        "pumpSettings" => Some(Kind::PumpSettings),
        "wizard" => Some(Kind::BolusCalculator),
        other => {
            debug!(datum_type = other, "unknown record type");
            reader.context().append_error("type", errors::type_invalid(other));
            None
        }
    }
}

fn secondary(
    reader: &ObjectReader<'_, '_>,
    discriminant: Discriminant,
    select: impl Fn(&str) -> Option<Kind>,
) -> Option<Kind> {
    let field = discriminant.field();
    let value = read_discriminant(reader, field)?;
    let kind = select(&value);
    if kind.is_none() {
        debug!(field, value = value.as_str(), "unknown record discriminant");
        reader.context().append_error(field, invalid(discriminant, &value));
    }
    kind
}

/// Anything that does not read as a string counts as missing, so a value of
/// the wrong type gets both the reader's type error and `value-missing`.
fn read_discriminant(reader: &ObjectReader<'_, '_>, field: &str) -> Option<String> {
    let value = reader.read_string(field);
    if value.is_none() {
        debug!(field, "record discriminant missing");
        reader.context().append_error(field, errors::value_missing());
    }
    value
}

fn invalid(discriminant: Discriminant, value: &str) -> ErrorDetail {
    match discriminant {
        Discriminant::SubType => errors::sub_type_invalid(value),
        Discriminant::DeliveryType => errors::delivery_type_invalid(value),
    }
}
