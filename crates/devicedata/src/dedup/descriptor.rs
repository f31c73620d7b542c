//! The record of which deduplicator a dataset (or a record) is bound to.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

use super::deduplicator::Deduplicator;

/// Name, version and, for hashed records, identity hash of a deduplicator.
///
/// An empty name means unbound. Once a name is set it never changes:
/// registering again fails instead of overwriting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeduplicatorDescriptor {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub hash: String,
}

impl DeduplicatorDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered_with_any(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_registered_with_named(&self, name: &str) -> bool {
        self.name == name
    }

    /// Bind to `name`/`version`. Fails if the descriptor is already bound.
    pub fn register(&mut self, name: &str, version: &str) -> Result<()> {
        if !self.name.is_empty() {
            return Err(DataError::AlreadyRegistered {
                name: self.name.clone(),
            });
        }
        if !self.version.is_empty() {
            return Err(DataError::AlreadyRegisteredWithUnknown);
        }

        self.name = name.to_string();
        self.version = version.to_string();
        Ok(())
    }

    pub fn register_with(&mut self, deduplicator: &dyn Deduplicator) -> Result<()> {
        self.register(deduplicator.name(), deduplicator.version())
    }
}
