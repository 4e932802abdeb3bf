//! `zenodo-harvester` binary.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use zenodo_harvester::cli;

/// Log to stderr so stdout carries only the rendered records.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "Harvest failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
