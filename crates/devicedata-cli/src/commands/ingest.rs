//! Ingest command - validate records, then deduplicate them into a dataset.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use devicedata::dedup::{
    DataStoreSession, Dataset, DatasetState, DatasetType, DelegateFactory, MemoryStore,
};
use devicedata::{Datum, Pipeline, Record};
use tracing::warn;

use super::{load_config, load_documents};

pub struct IngestArgs {
    pub file: PathBuf,
    pub user_id: String,
    pub upload_id: String,
    pub device_id: Option<String>,
    pub manufacturers: Vec<String>,
    pub continuous: bool,
    pub config: Option<PathBuf>,
}

/// What happened to one upload.
#[derive(Debug, PartialEq, Eq)]
pub struct IngestSummary {
    pub deduplicator: String,
    pub received: usize,
    pub rejected: usize,
    pub active: usize,
    pub state: DatasetState,
}

pub fn run(args: IngestArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let documents = load_documents(&args.file)?;
    let session: Arc<dyn DataStoreSession> = Arc::new(MemoryStore::new());
    let summary = ingest(&args, &documents, session)?;

    println!(
        "{} {} {}",
        "Ingested".cyan().bold(),
        args.file.display().to_string().white(),
        format!("into {}", args.upload_id).dimmed()
    );
    println!();
    println!("  Deduplicator: {}", summary.deduplicator.white().bold());
    println!("  Received:     {}", summary.received);
    println!("  Rejected:     {}", summary.rejected.to_string().red());
    println!("  Active:       {}", summary.active.to_string().green());
    println!("  Dataset:      {:?}", summary.state);
    if verbose && summary.rejected > 0 {
        println!();
        println!("Run 'devicedata validate {}' for details.", args.file.display());
    }
    Ok(())
}

/// Runs the pipeline, binds a deduplicator to a fresh dataset and hands it
/// the valid records.
pub fn ingest(
    args: &IngestArgs,
    documents: &[serde_json::Value],
    session: Arc<dyn DataStoreSession>,
) -> Result<IngestSummary, Box<dyn std::error::Error>> {
    let config = load_config(args.config.clone())?;
    let delegate = DelegateFactory::from_config(&config.deduplicator)?;
    let outcomes = Pipeline::with_config(config).process_batch(documents);

    let received = outcomes.len();
    let valid: Vec<Datum> = outcomes
        .into_iter()
        .filter(|outcome| outcome.is_valid())
        .filter_map(|outcome| outcome.datum)
        .collect();
    let rejected = received - valid.len();
    if rejected > 0 {
        warn!(rejected, received, "skipping invalid records");
    }

    let device_id = args
        .device_id
        .clone()
        .or_else(|| valid.iter().find_map(|datum| datum.base().device_id.clone()))
        .ok_or("No device id given and no valid record carries one")?;

    let dataset_type = if args.continuous {
        DatasetType::Continuous
    } else {
        DatasetType::Normal
    };
    let dataset = Dataset::new(&args.user_id, &args.upload_id)
        .with_type(dataset_type)
        .with_device_id(device_id)
        .with_device_manufacturers(args.manufacturers.iter().cloned());
    session.create_dataset(&dataset)?;

    let deduplicator = delegate.new_deduplicator_for_dataset(session.clone(), &dataset)?;
    deduplicator.register_dataset()?;
    deduplicator.add_dataset_data(valid)?;
    deduplicator.deduplicate_dataset()?;

    let active = session
        .get_dataset_data(&args.upload_id)?
        .iter()
        .filter(|datum| datum.base().active)
        .count();
    let state = session
        .get_dataset(&args.upload_id)?
        .map(|dataset| dataset.state)
        .ok_or("Dataset disappeared during ingest")?;

    Ok(IngestSummary {
        deduplicator: deduplicator.name().to_string(),
        received,
        rejected,
        active,
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(manufacturers: &[&str]) -> IngestArgs {
        IngestArgs {
            file: PathBuf::from("records.json"),
            user_id: "user".to_string(),
            upload_id: "upload".to_string(),
            device_id: None,
            manufacturers: manufacturers.iter().map(|m| m.to_string()).collect(),
            continuous: false,
            config: None,
        }
    }

    fn documents() -> Vec<serde_json::Value> {
        vec![
            json!({"type": "cbg", "deviceId": "DexG5_123", "time": "2016-05-04T15:18:06Z", "value": 110, "units": "mg/dL"}),
            json!({"type": "cbg", "deviceId": "DexG5_123", "time": "2016-05-04T15:23:06Z", "value": 2000, "units": "mg/dL"}),
            json!({"type": "smbg", "deviceId": "DexG5_123", "time": "2016-05-04T15:30:00Z", "value": 6.1, "units": "mmol/L"}),
        ]
    }

    #[test]
    fn test_ingest_hashes_valid_records() {
        let session: Arc<dyn DataStoreSession> = Arc::new(MemoryStore::new());
        let summary = ingest(&args(&[]), &documents(), session).unwrap();

        assert_eq!(
            summary,
            IngestSummary {
                deduplicator: "org.tidepool.hash-deactivate-old".to_string(),
                received: 3,
                rejected: 1,
                active: 2,
                state: DatasetState::Closed,
            }
        );
    }

    #[test]
    fn test_ingest_truncates_for_listed_manufacturer() {
        let session: Arc<dyn DataStoreSession> = Arc::new(MemoryStore::new());
        let summary = ingest(&args(&["Medtronic"]), &documents(), session).unwrap();
        assert_eq!(summary.deduplicator, "org.tidepool.truncate");
        assert_eq!(summary.active, 2);
    }

    #[test]
    fn test_ingest_needs_a_device_id() {
        let session: Arc<dyn DataStoreSession> = Arc::new(MemoryStore::new());
        let err = ingest(&args(&[]), &[json!({"type": "nope"})], session).unwrap_err();
        assert!(err.to_string().contains("device id"));
    }
}
