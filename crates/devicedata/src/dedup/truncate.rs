//! Truncate: a new upload from a device replaces all earlier data from it.

use std::sync::Arc;

use tracing::info;

use crate::data::Datum;
use crate::error::{DataError, Result};

use super::dataset::Dataset;
use super::deduplicator::{Deduplicator, DeduplicatorBase, DeduplicatorFactory};
use super::store::DataStoreSession;

pub const TRUNCATE_NAME: &str = "org.tidepool.truncate";
pub const TRUNCATE_VERSION: &str = "1.0.0";

/// Accepts datasets with a device id from one of the configured
/// manufacturers.
#[derive(Debug, Clone)]
pub struct TruncateFactory {
    device_manufacturers: Vec<String>,
}

impl TruncateFactory {
    pub fn new(device_manufacturers: Vec<String>) -> Self {
        Self {
            device_manufacturers,
        }
    }
}

impl DeduplicatorFactory for TruncateFactory {
    fn name(&self) -> &str {
        TRUNCATE_NAME
    }

    fn can_deduplicate_dataset(&self, dataset: &Dataset) -> Result<bool> {
        Ok(dataset.device_id.as_deref().is_some_and(|id| !id.is_empty())
            && dataset.has_manufacturer_in(&self.device_manufacturers))
    }

    fn new_deduplicator_for_dataset(
        &self,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Result<Box<dyn Deduplicator>> {
        if !self.can_deduplicate_dataset(dataset)? {
            return Err(DataError::DeduplicatorNotFound);
        }
        Ok(Box::new(TruncateDeduplicator::new(session, dataset)))
    }

    fn new_registered_deduplicator_for_dataset(
        &self,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Result<Box<dyn Deduplicator>> {
        if !self.is_registered_with_dataset(dataset)? {
            return Err(DataError::NotRegistered);
        }
        Ok(Box::new(TruncateDeduplicator::new(session, dataset)))
    }
}

pub struct TruncateDeduplicator {
    base: DeduplicatorBase,
}

impl TruncateDeduplicator {
    fn new(session: Arc<dyn DataStoreSession>, dataset: &Dataset) -> Self {
        Self {
            base: DeduplicatorBase::new(TRUNCATE_NAME, TRUNCATE_VERSION, session, dataset),
        }
    }
}

impl Deduplicator for TruncateDeduplicator {
    fn name(&self) -> &str {
        self.base.name
    }

    fn version(&self) -> &str {
        self.base.version
    }

    fn register_dataset(&self) -> Result<()> {
        self.base.register_dataset()
    }

    fn add_dataset_data(&self, mut data: Vec<Datum>) -> Result<()> {
        self.base.persisted_dataset()?;
        self.base.prepare(&mut data);
        self.base.store(data)
    }

    fn deduplicate_dataset(&self) -> Result<()> {
        let dataset = self.base.persisted_dataset()?;
        let session = &self.base.session;
        let activated = session.activate_dataset_data(&dataset.upload_id)?;
        let removed = session.delete_other_dataset_data(&dataset)?;
        self.base.close(&dataset)?;
        info!(
            upload_id = dataset.upload_id.as_str(),
            activated, removed, "truncated device data"
        );
        Ok(())
    }

    fn delete_dataset(&self) -> Result<()> {
        self.base.delete_dataset()
    }
}
