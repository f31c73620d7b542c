//! The storage collaborator used by deduplicators, plus an in-memory store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tracing::debug;

use crate::data::{Datum, Record};
use crate::error::{DataError, Result};

use super::dataset::{Dataset, DatasetState};

/// Dataset and record persistence as seen by the deduplicators.
///
/// Implementations are shared across threads. `register_dataset_deduplicator`
/// must check and write the persisted descriptor atomically so that only one
/// of several concurrent registrations succeeds.
pub trait DataStoreSession: Send + Sync {
    fn create_dataset(&self, dataset: &Dataset) -> Result<()>;

    fn get_dataset(&self, upload_id: &str) -> Result<Option<Dataset>>;

    /// Bind the persisted dataset to a deduplicator and return the updated
    /// dataset. Fails with [`DataError::AlreadyRegistered`] if already bound.
    fn register_dataset_deduplicator(&self, upload_id: &str, name: &str, version: &str)
        -> Result<Dataset>;

    fn update_dataset_state(&self, upload_id: &str, state: DatasetState) -> Result<()>;

    /// Mark the dataset deleted and drop its records.
    fn delete_dataset(&self, upload_id: &str) -> Result<()>;

    fn create_dataset_data(&self, upload_id: &str, data: Vec<Datum>) -> Result<()>;

    fn get_dataset_data(&self, upload_id: &str) -> Result<Vec<Datum>>;

    /// Activate every record of the dataset. Returns how many changed.
    fn activate_dataset_data(&self, upload_id: &str) -> Result<usize>;

    /// Remove records of the same user and device stored by other datasets.
    fn delete_other_dataset_data(&self, dataset: &Dataset) -> Result<usize>;

    /// Deactivate the same user's active records in other datasets whose
    /// identity hash is one of `hashes`.
    fn deactivate_other_dataset_data_with_hashes(
        &self,
        dataset: &Dataset,
        hashes: &[String],
    ) -> Result<usize>;
}

#[derive(Debug, Default)]
struct Inner {
    datasets: IndexMap<String, Dataset>,
    data: IndexMap<String, Vec<Datum>>,
}

/// A [`DataStoreSession`] backed by process memory, guarded by one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| DataError::Store("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| DataError::Store("memory store lock poisoned".to_string()))
    }
}

fn dataset_mut<'a>(inner: &'a mut Inner, upload_id: &str) -> Result<&'a mut Dataset> {
    inner
        .datasets
        .get_mut(upload_id)
        .ok_or_else(|| DataError::DatasetNotFound {
            upload_id: upload_id.to_string(),
        })
}

fn same_device(record: &Datum, dataset: &Dataset) -> bool {
    let base = record.base();
    base.user_id.as_deref() == Some(dataset.user_id.as_str())
        && base.device_id.is_some()
        && base.device_id == dataset.device_id
}

impl DataStoreSession for MemoryStore {
    fn create_dataset(&self, dataset: &Dataset) -> Result<()> {
        let mut inner = self.write()?;
        if inner.datasets.contains_key(&dataset.upload_id) {
            return Err(DataError::Store(format!(
                "dataset '{}' already exists",
                dataset.upload_id
            )));
        }
        inner
            .datasets
            .insert(dataset.upload_id.clone(), dataset.clone());
        Ok(())
    }

    fn get_dataset(&self, upload_id: &str) -> Result<Option<Dataset>> {
        Ok(self.read()?.datasets.get(upload_id).cloned())
    }

    fn register_dataset_deduplicator(
        &self,
        upload_id: &str,
        name: &str,
        version: &str,
    ) -> Result<Dataset> {
        let mut inner = self.write()?;
        let dataset = dataset_mut(&mut inner, upload_id)?;
        if dataset.deleted {
            return Err(DataError::DatasetDeleted {
                upload_id: upload_id.to_string(),
            });
        }
        dataset.deduplicator.register(name, version)?;
        Ok(dataset.clone())
    }

    fn update_dataset_state(&self, upload_id: &str, state: DatasetState) -> Result<()> {
        let mut inner = self.write()?;
        dataset_mut(&mut inner, upload_id)?.state = state;
        Ok(())
    }

    fn delete_dataset(&self, upload_id: &str) -> Result<()> {
        let mut inner = self.write()?;
        dataset_mut(&mut inner, upload_id)?.deleted = true;
        let removed = inner
            .data
            .shift_remove(upload_id)
            .map_or(0, |data| data.len());
        debug!(upload_id, removed, "deleted dataset");
        Ok(())
    }

    fn create_dataset_data(&self, upload_id: &str, data: Vec<Datum>) -> Result<()> {
        let mut inner = self.write()?;
        if dataset_mut(&mut inner, upload_id)?.deleted {
            return Err(DataError::DatasetDeleted {
                upload_id: upload_id.to_string(),
            });
        }
        inner
            .data
            .entry(upload_id.to_string())
            .or_default()
            .extend(data);
        Ok(())
    }

    fn get_dataset_data(&self, upload_id: &str) -> Result<Vec<Datum>> {
        Ok(self
            .read()?
            .data
            .get(upload_id)
            .cloned()
            .unwrap_or_default())
    }

    fn activate_dataset_data(&self, upload_id: &str) -> Result<usize> {
        let mut inner = self.write()?;
        let mut changed = 0;
        for record in inner.data.get_mut(upload_id).into_iter().flatten() {
            let base = record.base_mut();
            if !base.active {
                base.active = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn delete_other_dataset_data(&self, dataset: &Dataset) -> Result<usize> {
        let mut inner = self.write()?;
        let mut removed = 0;
        for (upload_id, data) in inner.data.iter_mut() {
            if *upload_id == dataset.upload_id {
                continue;
            }
            let before = data.len();
            data.retain(|record| !same_device(record, dataset));
            removed += before - data.len();
        }
        Ok(removed)
    }

    fn deactivate_other_dataset_data_with_hashes(
        &self,
        dataset: &Dataset,
        hashes: &[String],
    ) -> Result<usize> {
        let mut inner = self.write()?;
        let mut changed = 0;
        for (upload_id, data) in inner.data.iter_mut() {
            if *upload_id == dataset.upload_id {
                continue;
            }
            for record in data.iter_mut() {
                let base = record.base_mut();
                let matches = base.active
                    && base.user_id.as_deref() == Some(dataset.user_id.as_str())
                    && base
                        .deduplicator
                        .as_ref()
                        .is_some_and(|descriptor| hashes.contains(&descriptor.hash));
                if matches {
                    base.active = false;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }
}
