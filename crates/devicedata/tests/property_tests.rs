//! Property-based tests for the record pipeline.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p devicedata --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p devicedata --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use devicedata::context::{Context, ErrorSink};
use devicedata::normalizer::Normalizer;
use devicedata::reader::ObjectReader;
use devicedata::{Datum, Pipeline};

// =============================================================================
// Test Strategies
// =============================================================================

/// Field overrides that each break exactly one field of a scheduled basal.
const VIOLATIONS: [(&str, &str); 5] = [
    ("deviceId", r#""""#),
    ("timezoneOffset", "20000"),
    ("duration", "-1"),
    ("rate", "50"),
    ("scheduleName", r#""A""#),
];

fn violations() -> impl Strategy<Value = Vec<(&'static str, &'static str)>> {
    proptest::sample::subsequence(VIOLATIONS.to_vec(), 0..=VIOLATIONS.len()).prop_shuffle()
}

fn arbitrary_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-zA-Z/ ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("type".to_string()),
                    Just("subType".to_string()),
                    Just("deliveryType".to_string()),
                    Just("value".to_string()),
                    Just("units".to_string()),
                    Just("change".to_string()),
                    "[a-z]{1,8}",
                ],
                inner,
                0..6
            )
            .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn scheduled_basal(overrides: &[(&str, &str)]) -> Value {
    let mut doc: Map<String, Value> = json!({
        "type": "basal",
        "deliveryType": "scheduled",
        "deviceId": "pump",
        "time": "2016-05-04T15:18:06Z",
        "duration": 3600000,
        "rate": 0.75,
        "scheduleName": "Weekday"
    })
    .as_object()
    .cloned()
    .unwrap_or_default();
    for (field, raw) in overrides {
        doc.insert(field.to_string(), serde_json::from_str(raw).unwrap());
    }
    Value::Object(doc)
}

fn glucose_value(doc: &Value) -> (Option<f64>, Option<String>) {
    match Pipeline::new().process(doc).datum {
        Some(Datum::ContinuousGlucose(cbg)) => (cbg.reading.value, cbg.reading.units),
        other => panic!("unexpected datum: {:?}", other),
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// One error per violated field, whatever the order of the fields.
    #[test]
    fn prop_collect_all(overrides in violations()) {
        let outcome = Pipeline::new().process(&scheduled_basal(&overrides));

        prop_assert_eq!(outcome.errors.len(), overrides.len());
        for (field, _) in &overrides {
            let pointer = format!("/{}", field);
            prop_assert_eq!(
                outcome.errors.iter().filter(|e| e.pointer() == pointer).count(),
                1
            );
        }
    }

    /// Normalizing canonical values changes neither value nor units.
    #[test]
    fn prop_mmol_normalization_is_identity(value in 0.0f64..=55.0) {
        let doc = json!({
            "type": "cbg",
            "deviceId": "cgm",
            "time": "2016-05-04T15:18:06Z",
            "value": value,
            "units": "mmol/L"
        });
        prop_assert_eq!(glucose_value(&doc), (Some(value), Some("mmol/L".to_string())));
    }

    /// mg/dL values are divided by the conversion factor with no rounding,
    /// and converting the result again leaves it alone.
    #[test]
    fn prop_mg_dl_conversion_is_exact(value in 0.0f64..=1000.0, units in "mg/d[lL]") {
        let doc = json!({
            "type": "cbg",
            "deviceId": "cgm",
            "time": "2016-05-04T15:18:06Z",
            "value": value,
            "units": units
        });
        let (converted, canonical) = glucose_value(&doc);
        prop_assert_eq!(converted, Some(value / 18.01559));
        prop_assert_eq!(canonical.as_deref(), Some("mmol/L"));

        let sink = ErrorSink::new();
        let glucose = Normalizer::new(Context::new(&sink)).blood_glucose("units", canonical.as_deref());
        prop_assert_eq!(glucose.value(converted), converted);
        prop_assert!(sink.is_empty());
    }

    /// Unknown primary discriminants are reported once, quoting the value.
    #[test]
    fn prop_unknown_type(datum_type in "[a-zA-Z]{1,16}") {
        prop_assume!(!["basal", "bolus", "cbg", "smbg", "deviceEvent", "pumpSettings", "wizard"]
            .contains(&datum_type.as_str()));
        let outcome = Pipeline::new().process(&json!({"type": datum_type}));

        prop_assert!(outcome.datum.is_none());
        prop_assert_eq!(outcome.errors.len(), 1);
        prop_assert_eq!(outcome.errors[0].code(), "type-invalid");
        let quoted = format!("\"{}\"", datum_type);
        prop_assert!(outcome.errors[0].detail.detail.contains(&quoted));
    }

    /// Reading past the end of an array is silent.
    #[test]
    fn prop_out_of_range_index(len in 0usize..8, extra in 0usize..8) {
        let values: Vec<Value> = (0..len).map(Value::from).collect();
        let doc = json!({"values": values});
        let sink = ErrorSink::new();
        let reader = ObjectReader::new(Context::new(&sink), doc.as_object());
        let array = reader.array_reader("values");

        prop_assert_eq!(array.read_integer(len + extra), None);
        prop_assert!(sink.is_empty());
    }

    /// Any document is either rejected with errors or produces a record;
    /// nothing panics and every pointer is rooted.
    #[test]
    fn prop_arbitrary_documents(doc in arbitrary_json()) {
        let outcome = Pipeline::new().process(&doc);
        if outcome.datum.is_none() {
            prop_assert!(!outcome.errors.is_empty());
        }
        for error in &outcome.errors {
            let pointer = error.pointer();
            prop_assert!(pointer.is_empty() || pointer.starts_with('/'));
        }
    }
}
