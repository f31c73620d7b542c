//! Deduplicator and factory traits, and the state every deduplicator shares.

use std::sync::Arc;

use tracing::{debug, info};

use crate::data::{Datum, Record};
use crate::error::{DataError, Result};

use super::dataset::{Dataset, DatasetState, DatasetType};
use super::store::DataStoreSession;

/// A strategy managing one dataset's data lifecycle.
pub trait Deduplicator: Send + Sync {
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Bind the persisted dataset to this deduplicator. Only one
    /// registration per dataset ever succeeds.
    fn register_dataset(&self) -> Result<()>;

    fn add_dataset_data(&self, data: Vec<Datum>) -> Result<()>;

    fn deduplicate_dataset(&self) -> Result<()>;

    fn delete_dataset(&self) -> Result<()>;
}

/// Builds deduplicators for the datasets it accepts.
pub trait DeduplicatorFactory: Send + Sync {
    /// Name of the deduplicators this factory builds.
    fn name(&self) -> &str;

    fn can_deduplicate_dataset(&self, dataset: &Dataset) -> Result<bool>;

    /// A deduplicator for a dataset not yet bound. The caller registers it.
    fn new_deduplicator_for_dataset(
        &self,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Result<Box<dyn Deduplicator>>;

    fn is_registered_with_dataset(&self, dataset: &Dataset) -> Result<bool> {
        Ok(dataset.descriptor().is_registered_with_named(self.name()))
    }

    /// A deduplicator for a dataset already bound to this factory's name.
    fn new_registered_deduplicator_for_dataset(
        &self,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Result<Box<dyn Deduplicator>>;
}

/// Identity, store handle and dataset shared by the concrete deduplicators.
pub(crate) struct DeduplicatorBase {
    pub name: &'static str,
    pub version: &'static str,
    pub session: Arc<dyn DataStoreSession>,
    pub dataset: Dataset,
}

impl DeduplicatorBase {
    pub fn new(
        name: &'static str,
        version: &'static str,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Self {
        Self {
            name,
            version,
            session,
            dataset: dataset.clone(),
        }
    }

    pub fn upload_id(&self) -> &str {
        &self.dataset.upload_id
    }

    pub fn register_dataset(&self) -> Result<()> {
        self.session
            .register_dataset_deduplicator(self.upload_id(), self.name, self.version)?;
        info!(
            upload_id = self.upload_id(),
            deduplicator = self.name,
            "registered dataset with deduplicator"
        );
        Ok(())
    }

    /// The persisted dataset, which must be live and bound to this
    /// deduplicator.
    pub fn persisted_dataset(&self) -> Result<Dataset> {
        let dataset = self
            .session
            .get_dataset(self.upload_id())?
            .ok_or_else(|| DataError::DatasetNotFound {
                upload_id: self.upload_id().to_string(),
            })?;
        if dataset.deleted {
            return Err(DataError::DatasetDeleted {
                upload_id: self.upload_id().to_string(),
            });
        }
        if !dataset.descriptor().is_registered_with_named(self.name) {
            return Err(DataError::NotRegistered);
        }
        Ok(dataset)
    }

    /// Link records to the dataset. New records stay inactive until the
    /// dataset is deduplicated.
    pub fn prepare(&self, data: &mut [Datum]) {
        for record in data.iter_mut() {
            let base = record.base_mut();
            base.user_id = Some(self.dataset.user_id.clone());
            base.upload_id = Some(self.dataset.upload_id.clone());
            base.active = false;
        }
    }

    pub fn store(&self, data: Vec<Datum>) -> Result<()> {
        let count = data.len();
        self.session.create_dataset_data(self.upload_id(), data)?;
        debug!(
            upload_id = self.upload_id(),
            deduplicator = self.name,
            count,
            "added dataset data"
        );
        Ok(())
    }

    /// Close a normal dataset once deduplicated; continuous ones stay open.
    pub fn close(&self, dataset: &Dataset) -> Result<()> {
        if dataset.dataset_type == DatasetType::Normal {
            self.session
                .update_dataset_state(&dataset.upload_id, DatasetState::Closed)?;
        }
        Ok(())
    }

    pub fn delete_dataset(&self) -> Result<()> {
        self.session.delete_dataset(self.upload_id())?;
        info!(
            upload_id = self.upload_id(),
            deduplicator = self.name,
            "deleted dataset"
        );
        Ok(())
    }
}
