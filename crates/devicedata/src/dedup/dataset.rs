//! Datasets: records uploaded together from one device.

use serde::{Deserialize, Serialize};

use super::descriptor::DeduplicatorDescriptor;

/// How the dataset's data arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    /// One upload, closed once deduplicated.
    #[default]
    Normal,
    /// Data keeps arriving over time.
    Continuous,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetState {
    #[default]
    Open,
    Closed,
}

/// A dataset and its deduplicator binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(rename = "_userId")]
    pub user_id: String,
    pub upload_id: String,
    #[serde(rename = "dataSetType")]
    pub dataset_type: DatasetType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub device_manufacturers: Vec<String>,
    pub state: DatasetState,
    #[serde(rename = "_deleted", default)]
    pub deleted: bool,
    #[serde(rename = "_deduplicator", default)]
    pub deduplicator: DeduplicatorDescriptor,
}

impl Dataset {
    /// An open, unbound dataset.
    pub fn new(user_id: impl Into<String>, upload_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            upload_id: upload_id.into(),
            dataset_type: DatasetType::default(),
            device_id: None,
            device_manufacturers: Vec::new(),
            state: DatasetState::default(),
            deleted: false,
            deduplicator: DeduplicatorDescriptor::new(),
        }
    }

    pub fn with_type(mut self, dataset_type: DatasetType) -> Self {
        self.dataset_type = dataset_type;
        self
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_device_manufacturers<I, S>(mut self, manufacturers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.device_manufacturers = manufacturers.into_iter().map(Into::into).collect();
        self
    }

    pub fn descriptor(&self) -> &DeduplicatorDescriptor {
        &self.deduplicator
    }

    /// Whether any of the dataset's manufacturers appears in `manufacturers`.
    pub fn has_manufacturer_in(&self, manufacturers: &[String]) -> bool {
        self.device_manufacturers
            .iter()
            .any(|manufacturer| manufacturers.contains(manufacturer))
    }
}
