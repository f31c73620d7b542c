//! CLI command implementations.

pub mod ingest;
pub mod validate;

use std::path::{Path, PathBuf};

use devicedata::PipelineConfig;
use serde_json::Value;

/// Reads a file holding either one document or an array of documents.
pub fn load_documents(path: &Path) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    Ok(match value {
        Value::Array(documents) => documents,
        document => vec![document],
    })
}

pub fn load_config(path: Option<PathBuf>) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(PipelineConfig::load(path)?),
        None => Ok(PipelineConfig::default()),
    }
}
