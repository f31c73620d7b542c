//! Hash deactivate-old: records are identified by a hash of their identity
//! fields, and a newer upload deactivates older records with the same hash.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::data::{Datum, Record};
use crate::error::{DataError, Result};

use super::dataset::Dataset;
use super::deduplicator::{Deduplicator, DeduplicatorBase, DeduplicatorFactory};
use super::descriptor::DeduplicatorDescriptor;
use super::store::DataStoreSession;

pub const HASH_DEACTIVATE_OLD_NAME: &str = "org.tidepool.hash-deactivate-old";
pub const HASH_DEACTIVATE_OLD_VERSION: &str = "1.0.0";

/// SHA-256 over the identity fields, each terminated by `|`, as lowercase hex.
pub fn identity_hash(fields: &[String]) -> String {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.as_bytes());
        hasher.update(b"|");
    }
    format!("{:x}", hasher.finalize())
}

/// Accepts any dataset with a device id.
#[derive(Debug, Clone, Default)]
pub struct HashDeactivateOldFactory;

impl HashDeactivateOldFactory {
    pub fn new() -> Self {
        Self
    }
}

impl DeduplicatorFactory for HashDeactivateOldFactory {
    fn name(&self) -> &str {
        HASH_DEACTIVATE_OLD_NAME
    }

    fn can_deduplicate_dataset(&self, dataset: &Dataset) -> Result<bool> {
        Ok(dataset.device_id.as_deref().is_some_and(|id| !id.is_empty()))
    }

    fn new_deduplicator_for_dataset(
        &self,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Result<Box<dyn Deduplicator>> {
        if !self.can_deduplicate_dataset(dataset)? {
            return Err(DataError::DeduplicatorNotFound);
        }
        Ok(Box::new(HashDeactivateOldDeduplicator::new(session, dataset)))
    }

    fn new_registered_deduplicator_for_dataset(
        &self,
        session: Arc<dyn DataStoreSession>,
        dataset: &Dataset,
    ) -> Result<Box<dyn Deduplicator>> {
        if !self.is_registered_with_dataset(dataset)? {
            return Err(DataError::NotRegistered);
        }
        Ok(Box::new(HashDeactivateOldDeduplicator::new(session, dataset)))
    }
}

pub struct HashDeactivateOldDeduplicator {
    base: DeduplicatorBase,
}

impl HashDeactivateOldDeduplicator {
    fn new(session: Arc<dyn DataStoreSession>, dataset: &Dataset) -> Self {
        Self {
            base: DeduplicatorBase::new(
                HASH_DEACTIVATE_OLD_NAME,
                HASH_DEACTIVATE_OLD_VERSION,
                session,
                dataset,
            ),
        }
    }
}

impl Deduplicator for HashDeactivateOldDeduplicator {
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
        for record in data.iter_mut() {
            let hash = identity_hash(&record.identity_fields()?);
            record.base_mut().deduplicator = Some(DeduplicatorDescriptor {
                name: self.base.name.to_string(),
                version: self.base.version.to_string(),
                hash,
            });
        }
        self.base.store(data)
    }

    fn deduplicate_dataset(&self) -> Result<()> {
        let dataset = self.base.persisted_dataset()?;
        let session = &self.base.session;
        let hashes: Vec<String> = session
            .get_dataset_data(&dataset.upload_id)?
            .iter()
            .filter_map(|record| record.base().deduplicator.as_ref())
            .map(|descriptor| descriptor.hash.clone())
            .collect();

        let deactivated = session.deactivate_other_dataset_data_with_hashes(&dataset, &hashes)?;
        let activated = session.activate_dataset_data(&dataset.upload_id)?;
        self.base.close(&dataset)?;
        info!(
            upload_id = dataset.upload_id.as_str(),
            activated, deactivated, "deactivated older duplicates"
        );
        Ok(())
    }

    fn delete_dataset(&self) -> Result<()> {
        self.base.delete_dataset()
    }
}
