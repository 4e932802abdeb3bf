//! Rendering harvested records for display or saving.

use std::fs;
use std::path::Path;

use clap::ValueEnum;

use crate::config::TEXT_WRAP_WIDTH;
use crate::error::Result;
use crate::record::{HarvestedRecord, Record, RecordSummary};

/// Output serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML sequence of records.
    #[default]
    Yaml,
    /// Pretty-printed JSON array of records.
    Json,
    /// Human-readable listing.
    Text,
}

/// Render records in the given format.
///
/// Fails when a record lacks a required field.
pub fn render_records(records: &[Record], format: OutputFormat) -> Result<String> {
    let summaries = summarize_records(records, false)?;
    render_summaries(&summaries, format)
}

/// Summarize records for output, in order.
///
/// With `skip_invalid`, a record that lacks a required field is logged and
/// left out; otherwise the first such record fails the whole call.
pub fn summarize_records(records: &[Record], skip_invalid: bool) -> Result<Vec<RecordSummary>> {
    let mut summaries = Vec::with_capacity(records.len());

    for record in records {
        match record.summarize() {
            Ok(summary) => summaries.push(summary),
            Err(e) if skip_invalid => {
                let identifier = record.oai_identifier().ok();
                tracing::warn!(
                    identifier = identifier.as_deref(),
                    error = %e,
                    "Skipping incomplete record"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summaries)
}

/// Render already summarized records.
pub fn render_summaries(summaries: &[RecordSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(summaries)?),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(summaries)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(render_text(summaries)),
    }
}

fn render_text(summaries: &[RecordSummary]) -> String {
    let blocks: Vec<String> = summaries.iter().map(text_block).collect();

    if blocks.is_empty() {
        String::new()
    } else {
        format!("{}\n", blocks.join("\n\n"))
    }
}

/// One record as wrapped title followed by indented fields.
fn text_block(summary: &RecordSummary) -> String {
    let authors: Vec<String> = summary
        .authors
        .iter()
        .map(|author| match &author.affiliation {
            Some(affiliation) => format!("{} ({affiliation})", author.name),
            None => author.name.clone(),
        })
        .collect();

    let mut lines: Vec<String> = textwrap::wrap(&summary.title, TEXT_WRAP_WIDTH)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    lines.push(format!("  DOI: {}", summary.doi));
    lines.push(format!("  Date: {}", summary.date));
    lines.push(format!("  Authors: {}", authors.join("; ")));

    lines.join("\n")
}

/// Write rendered output to a file, creating parent directories.
pub fn save_output(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::MetadataFormat;
    use crate::records::parse_records;

    const LISTING: &str = r#"<OAI-PMH><ListRecords><record>
  <header><identifier>oai:zenodo.org:45009</identifier><datestamp>2016-04-13T09:27:11Z</datestamp></header>
  <metadata><oai_datacite><payload><resource>
    <identifier identifierType="DOI">10.5281/zenodo.45009</identifier>
    <creators><creator><creatorName>Sick, Jonathan</creatorName><affiliation>LSST</affiliation></creator></creators>
    <titles><title>Harvesting Zenodo</title></titles>
    <dates><date dateType="Issued">2016-04-12</date></dates>
    <descriptions><description descriptionType="Abstract">&lt;p&gt;Text&lt;/p&gt;</description></descriptions>
  </resource></payload></oai_datacite></metadata>
</record></ListRecords></OAI-PMH>"#;

    fn records() -> Vec<Record> {
        parse_records(LISTING, MetadataFormat::OaiDatacite3).unwrap()
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render_records(&records(), OutputFormat::Yaml).unwrap();

        assert!(yaml.contains("doi: 10.5281/zenodo.45009"));
        assert!(yaml.contains("2016-04-12"));
        assert!(yaml.contains("Sick, Jonathan"));
        assert!(!yaml.contains("publisher"));
    }

    #[test]
    fn test_render_json() {
        let json = render_records(&records(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["doi"], "10.5281/zenodo.45009");
        assert_eq!(parsed[0]["date"], "2016-04-12");
        assert_eq!(parsed[0]["abstract_html"], "<p>Text</p>");
        assert_eq!(parsed[0]["authors"][0]["affiliation"], "LSST");
    }

    #[test]
    fn test_render_text() {
        let text = render_records(&records(), OutputFormat::Text).unwrap();

        assert!(text.starts_with("Harvesting Zenodo\n"));
        assert!(text.contains("  DOI: 10.5281/zenodo.45009\n"));
        assert!(text.contains("  Authors: Sick, Jonathan (LSST)\n"));
    }

    #[test]
    fn test_render_text_separates_records() {
        let mut records = records();
        let copy = records.clone();
        records.extend(copy);
        let text = render_records(&records, OutputFormat::Text).unwrap();

        assert_eq!(text.matches("Harvesting Zenodo\n").count(), 2);
        assert!(text.contains("(LSST)\n\nHarvesting Zenodo\n"));
        assert!(text.ends_with("(LSST)\n"));
    }

    #[test]
    fn test_summarize_records_skips_incomplete() {
        let listing = LISTING.replace(
            "</record></ListRecords>",
            "</record><record><header><identifier>oai:zenodo.org:2</identifier></header>\
             <metadata><oai_datacite><payload><resource><titles><title>No DOI</title></titles>\
             </resource></payload></oai_datacite></metadata></record></ListRecords>",
        );
        let records = parse_records(&listing, MetadataFormat::OaiDatacite3).unwrap();
        assert_eq!(records.len(), 2);

        let summaries = summarize_records(&records, true).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].doi, "10.5281/zenodo.45009");

        let err = summarize_records(&records, false).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Schema);
        assert!(render_records(&records, OutputFormat::Yaml).is_err());
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_records(&[], OutputFormat::Text).unwrap(), "");
        assert_eq!(render_records(&[], OutputFormat::Json).unwrap(), "[]\n");
    }
}
