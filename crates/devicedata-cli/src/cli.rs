//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// devicedata: parse, validate and normalize diabetes device records
#[derive(Parser)]
#[command(name = "devicedata")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a JSON file holding one record or an array of records
    Validate {
        /// Path to the JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "csv")]
        json: bool,

        /// Output errors as CSV rows
        #[arg(long)]
        csv: bool,

        /// Pipeline configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report keys no record reads
        #[arg(long)]
        strict: bool,
    },

    /// Run records through the pipeline and deduplicate them into a dataset
    Ingest {
        /// Path to the JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Owner of the dataset
        #[arg(long)]
        user_id: String,

        /// Identifier of the upload (dataset)
        #[arg(long)]
        upload_id: String,

        /// Device identifier (default: taken from the first valid record)
        #[arg(long)]
        device_id: Option<String>,

        /// Device manufacturer; may be repeated
        #[arg(short, long)]
        manufacturer: Vec<String>,

        /// Treat the dataset as continuous (it stays open)
        #[arg(long)]
        continuous: bool,

        /// Pipeline configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
