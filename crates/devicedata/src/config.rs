//! Pipeline and deduplicator configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dedup::DeduplicatorConfig;
use crate::error::{DataError, Result};

/// Options for [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Rewrite unit-bearing fields into canonical units after validation.
    pub normalize: bool,
    /// Report every object key a record never reads as `not-parsed`.
    pub reject_unparsed: bool,
    /// Stop before validation when parsing already reported errors.
    pub skip_validation_on_parse_errors: bool,
    /// Deduplicator selection.
    pub deduplicator: DeduplicatorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            reject_unparsed: false,
            skip_validation_on_parse_errors: false,
            deduplicator: DeduplicatorConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_reject_unparsed(mut self, reject_unparsed: bool) -> Self {
        self.reject_unparsed = reject_unparsed;
        self
    }

    pub fn with_skip_validation_on_parse_errors(mut self, skip: bool) -> Self {
        self.skip_validation_on_parse_errors = skip;
        self
    }

    pub fn with_deduplicator(mut self, deduplicator: DeduplicatorConfig) -> Self {
        self.deduplicator = deduplicator;
        self
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DataError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            DataError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }
}
