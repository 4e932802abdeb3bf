//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    validate_collection, HarvestConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_RESPONSE_SIZE,
    HTTP_TIMEOUT_SECS,
};
use crate::error::Result;
use crate::format::MetadataFormat;
use crate::harvester::{harvest_collection_with, HarvestRequest};
use crate::output::{render_summaries, save_output, summarize_records, OutputFormat};

/// Zenodo Harvester - Fetch community metadata records over OAI-PMH.
#[derive(Parser)]
#[command(name = "zenodo-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest the records of a community.
    Harvest {
        /// Community name (e.g., lsst)
        collection: String,

        /// OAI-PMH metadata format
        #[arg(short, long, default_value = "oai_datacite3")]
        format: String,

        /// OAI-PMH endpoint URL
        #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Request timeout in seconds
        #[arg(short, long, default_value_t = HTTP_TIMEOUT_SECS)]
        timeout: u64,

        /// Maximum response size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_RESPONSE_SIZE)]
        max_size: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        output: OutputFormat,

        /// Write output to this file instead of stdout
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// Fail on the first record that lacks a required field instead of
        /// skipping it with a warning
        #[arg(long)]
        strict: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            collection,
            format,
            endpoint,
            timeout,
            max_size,
            output,
            output_file,
            strict,
        } => {
            let config = HarvestConfig::default()
                .with_endpoint(endpoint)
                .with_timeout_secs(timeout)
                .with_max_response_size(max_size);
            harvest_command(
                &config,
                &collection,
                &format,
                output,
                output_file.as_deref(),
                strict,
            )
        }
    }
}

/// Execute the harvest command.
fn harvest_command(
    config: &HarvestConfig,
    collection: &str,
    format: &str,
    output: OutputFormat,
    output_file: Option<&Path>,
    strict: bool,
) -> Result<()> {
    // Validate inputs before making HTTP requests
    validate_collection(collection)?;
    let format: MetadataFormat = format.parse()?;

    eprintln!(
        "{} {} as {}",
        style("Harvesting").bold(),
        style(collection).cyan(),
        style(format).green()
    );

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Requesting {}...", config.endpoint));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let request = HarvestRequest::new(collection).with_format(format);
    let records = match harvest_collection_with(config, &request) {
        Ok(records) => records,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Rendering records...");
    let summaries = match summarize_records(&records, !strict) {
        Ok(summaries) => summaries,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();
    let rendered = render_summaries(&summaries, output)?;

    eprintln!("  Records: {}", style(summaries.len()).green());
    let skipped = records.len() - summaries.len();
    if skipped > 0 {
        eprintln!("  Skipped: {} (missing required fields)", style(skipped).yellow());
    }

    match output_file {
        Some(path) => {
            save_output(&rendered, path)?;
            eprintln!(
                "{} {}",
                style("Saved to:").green().bold(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_harvest() {
        let cli = Cli::parse_from(["zenodo-harvester", "harvest", "lsst"]);

        let Commands::Harvest {
            collection,
            format,
            endpoint,
            timeout,
            output,
            output_file,
            strict,
            ..
        } = cli.command;
        assert_eq!(collection, "lsst");
        assert_eq!(format, "oai_datacite3");
        assert_eq!(endpoint, DEFAULT_ENDPOINT);
        assert_eq!(timeout, HTTP_TIMEOUT_SECS);
        assert_eq!(output, OutputFormat::Yaml);
        assert!(output_file.is_none());
        assert!(!strict);
    }

    #[test]
    fn test_cli_parse_harvest_with_options() {
        let cli = Cli::parse_from([
            "zenodo-harvester",
            "harvest",
            "lsst",
            "--endpoint",
            "http://localhost:8080/oai2d",
            "--timeout",
            "5",
            "--output",
            "json",
            "--output-file",
            "records.json",
            "--strict",
        ]);

        let Commands::Harvest {
            endpoint,
            timeout,
            output,
            output_file,
            strict,
            ..
        } = cli.command;
        assert_eq!(endpoint, "http://localhost:8080/oai2d");
        assert_eq!(timeout, 5);
        assert_eq!(output, OutputFormat::Json);
        assert_eq!(output_file, Some(PathBuf::from("records.json")));
        assert!(strict);
    }

    #[test]
    fn test_harvest_command_rejects_unknown_format() {
        let config = HarvestConfig::default().with_endpoint("http://127.0.0.1:9/oai2d");
        let err =
            harvest_command(&config, "lsst", "oai_dc", OutputFormat::Yaml, None, false).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UnsupportedFormat);
    }
}
