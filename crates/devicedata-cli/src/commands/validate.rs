//! Validate command - run documents through the pipeline and report errors.

use std::path::PathBuf;

use colored::Colorize;
use devicedata::{Outcome, Pipeline, Record};
use serde::Serialize;

use super::{load_config, load_documents};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Csv,
}

impl Format {
    pub fn from_flags(json: bool, csv: bool) -> Self {
        match (json, csv) {
            (true, _) => Format::Json,
            (_, true) => Format::Csv,
            _ => Format::Text,
        }
    }
}

/// One CSV line per error.
#[derive(Debug, Serialize)]
struct ErrorRow<'a> {
    record: usize,
    kind: String,
    pointer: &'a str,
    code: &'a str,
    title: &'a str,
    detail: &'a str,
}

pub fn run(
    file: PathBuf,
    format: Format,
    config: Option<PathBuf>,
    strict: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config)?;
    if strict {
        config = config.with_reject_unparsed(true);
    }
    let documents = load_documents(&file)?;
    let outcomes = Pipeline::with_config(config).process_batch(&documents);

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in error_rows(&outcomes) {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        Format::Text => print_text(&file, &outcomes, verbose),
    }

    let invalid = outcomes.iter().filter(|outcome| !outcome.is_valid()).count();
    if invalid > 0 {
        return Err(format!("{} of {} records are invalid", invalid, outcomes.len()).into());
    }
    Ok(())
}

fn kind_label(outcome: &Outcome) -> String {
    outcome
        .datum
        .as_ref()
        .map(|datum| datum.kind().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn error_rows(outcomes: &[Outcome]) -> Vec<ErrorRow<'_>> {
    outcomes
        .iter()
        .enumerate()
        .flat_map(|(index, outcome)| {
            outcome.errors.iter().map(move |error| ErrorRow {
                record: index,
                kind: kind_label(outcome),
                pointer: error.pointer(),
                code: error.code(),
                title: &error.detail.title,
                detail: &error.detail.detail,
            })
        })
        .collect()
}

fn print_text(file: &std::path::Path, outcomes: &[Outcome], verbose: bool) {
    println!(
        "{} {}",
        "Validating".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    for (index, outcome) in outcomes.iter().enumerate() {
        let label = kind_label(outcome);
        if outcome.is_valid() {
            if verbose {
                println!("  {} [{}] {}", "✓".green(), index, label);
            }
            continue;
        }
        println!("  {} [{}] {}", "✗".red(), index, label.yellow());
        for error in &outcome.errors {
            let pointer = if error.pointer().is_empty() {
                "/"
            } else {
                error.pointer()
            };
            println!(
                "      {} {} {}",
                pointer.white().bold(),
                error.code().red(),
                error.detail.detail.dimmed()
            );
        }
    }

    let valid = outcomes.iter().filter(|outcome| outcome.is_valid()).count();
    let invalid = outcomes.len() - valid;
    println!();
    println!(
        "{} records: {} valid, {} invalid",
        outcomes.len().to_string().white().bold(),
        valid.to_string().green(),
        if invalid > 0 {
            invalid.to_string().red()
        } else {
            invalid.to_string().normal()
        }
    );
}
