//! devicedata CLI - validate and ingest device telemetry records.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate {
            file,
            json,
            csv,
            config,
            strict,
        } => {
            let format = commands::validate::Format::from_flags(json, csv);
            commands::validate::run(file, format, config, strict, cli.verbose)
        }

        Commands::Ingest {
            file,
            user_id,
            upload_id,
            device_id,
            manufacturer,
            continuous,
            config,
        } => commands::ingest::run(
            commands::ingest::IngestArgs {
                file,
                user_id,
                upload_id,
                device_id,
                manufacturers: manufacturer,
                continuous,
                config,
            },
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise warnings, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
