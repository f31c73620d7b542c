//! Dispatch, parse, validate and normalize one document.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::context::{Context, ContextError, ErrorSink};
use crate::data::{dispatch, Datum, Record};
use crate::normalizer::Normalizer;
use crate::reader::{errors, ObjectReader};
use crate::validator::Validator;

/// The record built from a document, and every error found along the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// `None` when the document could not be dispatched.
    pub datum: Option<Datum>,
    pub errors: Vec<ContextError>,
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        self.datum.is_some() && self.errors.is_empty()
    }
}

/// Runs documents through the record pipeline.
///
/// Each call uses its own error sink, so one pipeline may serve any number
/// of threads.
///
/// ```
/// use devicedata::Pipeline;
/// use serde_json::json;
///
/// let outcome = Pipeline::new().process(&json!({
///     "type": "cbg",
///     "deviceId": "DexG5_123",
///     "time": "2016-05-04T15:18:06Z",
///     "value": 120,
///     "units": "mg/dL"
/// }));
/// assert!(outcome.is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn process(&self, document: &Value) -> Outcome {
        let sink = ErrorSink::new();
        let datum = self.run(&sink, document);
        let errors = sink.into_errors();
        if !errors.is_empty() {
            debug!(
                kind = ?datum.as_ref().map(|datum| datum.kind()),
                errors = errors.len(),
                "record finished with errors"
            );
        }
        Outcome { datum, errors }
    }

    pub fn process_batch(&self, documents: &[Value]) -> Vec<Outcome> {
        documents
            .iter()
            .map(|document| self.process(document))
            .collect()
    }

    fn run(&self, sink: &ErrorSink, document: &Value) -> Option<Datum> {
        let context = Context::new(sink);
        let Some(object) = document.as_object() else {
            context.append_error_here(errors::type_not_object(document));
            return None;
        };

        let reader =
            ObjectReader::new(context.clone(), Some(object)).strict(self.config.reject_unparsed);
        let kind = dispatch(&reader)?;
        sink.set_meta(kind.meta());

        let mut datum = Datum::new(kind);
        datum.parse(&reader);
        reader.finish();

        if self.config.skip_validation_on_parse_errors && !sink.is_empty() {
            return Some(datum);
        }
        datum.validate(&Validator::new(context.clone()));
        if self.config.normalize {
            datum.normalize(&Normalizer::new(context));
        }
        Some(datum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Meta;
    use serde_json::json;

    #[test]
    fn test_non_object_document() {
        let outcome = Pipeline::new().process(&json!([1, 2]));
        assert_eq!(outcome.datum, None);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].code(), "type-not-object");
        assert_eq!(outcome.errors[0].pointer(), "");
    }

    #[test]
    fn test_dispatch_errors_carry_no_meta() {
        let outcome = Pipeline::new().process(&json!({"type": "unknown"}));
        assert_eq!(outcome.datum, None);
        assert_eq!(outcome.errors[0].detail.meta, None);
    }

    #[test]
    fn test_errors_after_dispatch_carry_meta() {
        let outcome = Pipeline::new().process(&json!({"type": "basal", "deliveryType": "temp"}));
        assert!(outcome.datum.is_some());
        assert!(!outcome.errors.is_empty());
        let meta = Meta::new("basal").with_delivery_type("temp");
        assert!(outcome
            .errors
            .iter()
            .all(|error| error.detail.meta.as_ref() == Some(&meta)));
    }

    #[test]
    fn test_skip_validation_on_parse_errors() {
        let doc = json!({"type": "cbg", "deviceId": 7, "time": "2016-05-04T15:18:06Z"});
        let config = PipelineConfig::default().with_skip_validation_on_parse_errors(true);
        let outcome = Pipeline::with_config(config).process(&doc);

        let codes: Vec<_> = outcome.errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["type-not-string"]);
    }

    #[test]
    fn test_normalize_can_be_disabled() {
        let doc = json!({
            "type": "cbg",
            "deviceId": "cgm",
            "time": "2016-05-04T15:18:06Z",
            "value": 120,
            "units": "mg/dL"
        });
        let outcome = Pipeline::with_config(PipelineConfig::default().with_normalize(false))
            .process(&doc);
        match outcome.datum {
            Some(Datum::ContinuousGlucose(cbg)) => {
                assert_eq!(cbg.reading.value, Some(120.0));
                assert_eq!(cbg.reading.units.as_deref(), Some("mg/dL"));
            }
            other => panic!("unexpected datum: {:?}", other),
        }
    }
}
