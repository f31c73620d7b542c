//! Picks a deduplicator for a dataset from an ordered list of factories.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DataError, Result};

use super::dataset::Dataset;
use super::deduplicator::{Deduplicator, DeduplicatorFactory};
use super::hash::HashDeactivateOldFactory;
use super::store::DataStoreSession;
use super::truncate::TruncateFactory;

/// Which datasets the built-in deduplicators accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeduplicatorConfig {
    /// Datasets from these manufacturers are truncated instead of hashed.
    pub truncate_device_manufacturers: Vec<String>,
}

impl Default for DeduplicatorConfig {
    fn default() -> Self {
        Self {
            truncate_device_manufacturers: vec!["Animas".to_string(), "Medtronic".to_string()],
        }
    }
}

/// Delegates to the first factory that accepts a dataset.
pub struct DelegateFactory {
    factories: Vec<Box<dyn DeduplicatorFactory>>,
}

impl std::fmt::Debug for DelegateFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.factories.iter().map(|factory| factory.name()).collect();
        f.debug_struct("DelegateFactory")
            .field("factories", &names)
            .finish()
    }
}

impl DelegateFactory {
    /// Factories are consulted in order. At least one is required.
    pub fn new(factories: Vec<Box<dyn DeduplicatorFactory>>) -> Result<Self> {
        if factories.is_empty() {
            return Err(DataError::FactoriesMissing);
        }
        Ok(Self { factories })
    }

    /// Truncate for the configured manufacturers, hash for everything else.
    pub fn from_config(config: &DeduplicatorConfig) -> Result<Self> {
        Self::new(vec![
            Box::new(TruncateFactory::new(
                config.truncate_device_manufacturers.clone(),
            )),
            Box::new(HashDeactivateOldFactory::new()),
        ])
    }

    fn find_eligible(&self, dataset: &Dataset) -> Result<Option<&dyn DeduplicatorFactory>> {
        for factory in &self.factories {
            if factory.can_deduplicate_dataset(dataset)? {
                return Ok(Some(factory.as_ref()));
            }
        }
        Ok(None)
    }

    fn find_registered(&self, dataset: &Dataset) -> Result<Option<&dyn DeduplicatorFactory>> {
        for factory in &self.factories {
            if factory.is_registered_with_dataset(dataset)? {
                return Ok(Some(factory.as_ref()));
            }
        }
        Ok(None)
    }

    pub fn can_deduplicate_dataset(&self, dataset: &Dataset) -> Result<bool> {
        Ok(self.find_eligible(dataset)?.is_some())
    }

    /// A deduplicator from the first eligible factory. The descriptor is not
    /// touched; call [`Deduplicator::register_dataset`] before adding data.
    pub fn new_deduplicator_for_dataset(
        &self,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Result<Box<dyn Deduplicator>> {
        let Some(factory) = self.find_eligible(dataset)? else {
            debug!(upload_id = dataset.upload_id.as_str(), "no eligible deduplicator");
            return Err(DataError::DeduplicatorNotFound);
        };
        info!(
            upload_id = dataset.upload_id.as_str(),
            deduplicator = factory.name(),
            "selected deduplicator"
        );
        factory.new_deduplicator_for_dataset(session, dataset)
    }

    pub fn is_registered_with_dataset(&self, dataset: &Dataset) -> Result<bool> {
        Ok(self.find_registered(dataset)?.is_some())
    }

    /// The deduplicator the dataset is already bound to.
    pub fn new_registered_deduplicator_for_dataset(
        &self,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Result<Box<dyn Deduplicator>> {
        if !dataset.descriptor().is_registered_with_any() {
            return Err(DataError::NotRegistered);
        }
        let Some(factory) = self.find_registered(dataset)? else {
            return Err(DataError::DeduplicatorNotFound);
        };
        factory.new_registered_deduplicator_for_dataset(session, dataset)
    }
}
