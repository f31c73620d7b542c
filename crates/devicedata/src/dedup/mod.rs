//! Dataset deduplication.
//!
//! A dataset is bound to exactly one deduplicator, recorded in its
//! [`DeduplicatorDescriptor`]. The [`DelegateFactory`] picks the deduplicator
//! for an unbound dataset and finds it again for a bound one:
//!
//! ```
//! use std::sync::Arc;
//! use devicedata::dedup::{
//!     DataStoreSession, Dataset, DeduplicatorConfig, DelegateFactory, MemoryStore,
//! };
//!
//! # fn main() -> devicedata::Result<()> {
//! let session: Arc<dyn DataStoreSession> = Arc::new(MemoryStore::new());
//! let dataset = Dataset::new("user", "upload").with_device_id("DexG5_123");
//! session.create_dataset(&dataset)?;
//!
//! let delegate = DelegateFactory::from_config(&DeduplicatorConfig::default())?;
//! let deduplicator = delegate.new_deduplicator_for_dataset(session.clone(), &dataset)?;
//! deduplicator.register_dataset()?;
//!
//! // A second registration of the same dataset is refused.
//! assert!(deduplicator.register_dataset().is_err());
//! # Ok(())
//! # }
//! ```

mod dataset;
mod deduplicator;
mod delegate;
mod descriptor;
pub mod hash;
mod store;
pub mod truncate;

pub use dataset::{Dataset, DatasetState, DatasetType};
pub use deduplicator::{Deduplicator, DeduplicatorFactory};
pub use delegate::{DeduplicatorConfig, DelegateFactory};
pub use descriptor::DeduplicatorDescriptor;
pub use hash::{identity_hash, HashDeactivateOldFactory};
pub use store::{DataStoreSession, MemoryStore};
pub use truncate::TruncateFactory;
