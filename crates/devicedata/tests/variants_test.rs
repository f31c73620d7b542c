//! A valid document for every record variant, plus the checks specific to it.

use serde_json::{json, Value};

use devicedata::{Datum, Kind, Pipeline, Record};

fn document(kind: Kind, fields: Value) -> Value {
    let mut doc = json!({
        "type": kind.datum_type(),
        "deviceId": "InsOmn-1234567890",
        "time": "2016-05-04T15:18:06Z",
        "deviceTime": "2016-05-04T08:18:06",
        "timezoneOffset": -420
    });
    if let Some((discriminant, value)) = kind.secondary() {
        doc[discriminant.field()] = json!(value);
    }
    if let (Some(doc), Some(fields)) = (doc.as_object_mut(), fields.as_object()) {
        doc.extend(fields.clone());
    }
    doc
}

fn valid_fields(kind: Kind) -> Value {
    match kind {
        Kind::ScheduledBasal => json!({"duration": 3600000, "rate": 0.8, "scheduleName": "Weekday"}),
        Kind::TemporaryBasal => json!({"duration": 1800000, "percent": 0.5}),
        Kind::SuspendBasal => json!({"duration": 600000}),
        Kind::NormalBolus => json!({"normal": 2.5}),
        Kind::ExtendedBolus => json!({"extended": 3.0, "duration": 7200000}),
        Kind::ComboBolus => json!({"normal": 1.0, "extended": 2.0, "duration": 3600000}),
        Kind::ContinuousGlucose => json!({"value": 110, "units": "mg/dL"}),
        Kind::SelfMonitoredGlucose => json!({"value": 6.2, "units": "mmol/L", "subType": "manual"}),
        Kind::DeviceStatus => json!({"status": "suspended", "reason": {"suspended": "manual"}}),
        Kind::TimeChange => json!({
            "change": {"from": "2016-05-04T08:18:06", "to": "2016-05-04T09:18:06", "agent": "manual"}
        }),
        Kind::Calibration => json!({"value": 5.5, "units": "mmol/l"}),
        Kind::PumpSettings => json!({
            "activeSchedule": "standard",
            "units": {"carb": "grams", "bg": "mg/dL"},
            "basalSchedules": {"standard": [{"rate": 0.8, "start": 0}, {"rate": 1.2, "start": 21600000}]},
            "bgTarget": [{"low": 80, "high": 120, "start": 0}],
            "carbRatio": [{"amount": 10, "start": 0}],
            "insulinSensitivity": [{"amount": 50, "start": 0}]
        }),
        Kind::BolusCalculator => json!({
            "units": "mmol/L",
            "bgInput": 8.5,
            "carbInput": 45,
            "insulinOnBoard": 0.5,
            "insulinCarbRatio": 10,
            "insulinSensitivity": 2.5,
            "bgTarget": {"target": 6.0},
            "recommended": {"carb": 4.5, "correction": 1.0, "net": 5.0}
        }),
    }
}

#[test]
fn test_every_variant_accepts_a_valid_document() {
    for kind in Kind::ALL {
        let outcome = Pipeline::new().process(&document(kind, valid_fields(kind)));
        assert!(outcome.is_valid(), "{}: {:?}", kind, outcome.errors);
        assert_eq!(outcome.datum.map(|datum| datum.kind()), Some(kind));
    }
}

#[test]
fn test_every_variant_requires_base_fields() {
    for kind in Kind::ALL {
        let mut doc = document(kind, valid_fields(kind));
        if let Some(object) = doc.as_object_mut() {
            object.remove("deviceId");
            object.remove("time");
        }
        let outcome = Pipeline::new().process(&doc);
        let pointers: Vec<_> = outcome.errors.iter().map(|e| e.pointer()).collect();
        assert_eq!(pointers, vec!["/deviceId", "/time"], "{}", kind);
    }
}

#[test]
fn test_smbg_sub_type_must_be_known() {
    let doc = document(
        Kind::SelfMonitoredGlucose,
        json!({"value": 6.2, "units": "mmol/L", "subType": "scanned"}),
    );
    let outcome = Pipeline::new().process(&doc);
    let errors: Vec<_> = outcome.errors.iter().map(|e| (e.pointer(), e.code())).collect();
    assert_eq!(errors, vec![("/subType", "value-not-one-of")]);
}

#[test]
fn test_glucose_range_follows_units() {
    let mmol = document(Kind::ContinuousGlucose, json!({"value": 56, "units": "mmol/L"}));
    let mg = document(Kind::ContinuousGlucose, json!({"value": 56, "units": "mg/dL"}));

    assert_eq!(Pipeline::new().process(&mmol).errors[0].pointer(), "/value");
    assert!(Pipeline::new().process(&mg).is_valid());
}

#[test]
fn test_pump_settings_normalization() {
    let outcome = Pipeline::new().process(&document(
        Kind::PumpSettings,
        valid_fields(Kind::PumpSettings),
    ));
    let Some(Datum::PumpSettings(settings)) = outcome.datum else {
        panic!("expected pump settings");
    };
    let units = settings.units.expect("units");
    assert_eq!(units.bg.as_deref(), Some("mmol/L"));
    assert_eq!(units.carb.as_deref(), Some("grams"));

    let target = settings.bg_target.expect("bgTarget")[0].clone().expect("entry");
    assert_eq!(target.target.low, Some(80.0 / 18.01559));
    assert_eq!(target.target.high, Some(120.0 / 18.01559));

    let sensitivity = settings.insulin_sensitivity.expect("insulinSensitivity")[0]
        .clone()
        .expect("entry");
    assert_eq!(sensitivity.amount, Some(50.0 / 18.01559));

    // Rates and carb ratios carry no glucose units.
    let schedules = settings.basal_schedules.expect("basalSchedules");
    assert_eq!(schedules["standard"][1].as_ref().and_then(|entry| entry.rate), Some(1.2));
}

#[test]
fn test_combo_bolus_reports_both_portions() {
    let doc = document(
        Kind::ComboBolus,
        json!({"normal": -1, "extended": 200, "duration": 3600000, "expectedDuration": 60}),
    );
    let outcome = Pipeline::new().process(&doc);
    let errors: Vec<_> = outcome.errors.iter().map(|e| (e.pointer(), e.code())).collect();
    assert_eq!(
        errors,
        vec![
            ("/normal", "value-not-in-range"),
            ("/extended", "value-not-in-range"),
            ("/expectedDuration", "value-not-in-range"),
        ]
    );
}

#[test]
fn test_calculator_nested_errors() {
    let doc = document(
        Kind::BolusCalculator,
        json!({
            "units": "mmol/L",
            "bgTarget": {"low": 10, "high": 5},
            "recommended": {"carb": -1, "net": 1},
            "carbInput": 2000
        }),
    );
    let outcome = Pipeline::new().process(&doc);
    let pointers: Vec<_> = outcome.errors.iter().map(|e| e.pointer()).collect();
    assert_eq!(
        pointers,
        vec!["/bgTarget/high", "/carbInput", "/recommended/carb"]
    );
}

#[test]
fn test_identity_fields() {
    let outcome = Pipeline::new().process(&document(
        Kind::ContinuousGlucose,
        valid_fields(Kind::ContinuousGlucose),
    ));
    let mut datum = outcome.datum.expect("datum");

    // Identity needs the owning user.
    assert!(datum.identity_fields().is_err());

    datum.base_mut().user_id = Some("user-1".to_string());
    let fields = datum.identity_fields().unwrap();
    assert_eq!(fields[..4], ["user-1", "InsOmn-1234567890", "2016-05-04T15:18:06Z", "cbg"]);
    assert_eq!(fields[4], (110.0 / 18.01559).to_string());
    assert_eq!(fields[5], "mmol/L");
}
