//! Zenodo Harvester - Fetch community metadata from Zenodo over OAI-PMH.
//!
//! This crate downloads the `ListRecords` listing of a Zenodo community and
//! exposes every record with typed accessors (authors, DOI, title, abstract,
//! date).
//!
//! # Example
//!
//! ```
//! use zenodo_harvester::{parse_records, HarvestedRecord, MetadataFormat};
//!
//! let xml = r#"<OAI-PMH><ListRecords><record>
//!   <header><identifier>oai:zenodo.org:1</identifier></header>
//!   <metadata><oai_datacite><payload><resource>
//!     <identifier identifierType="DOI">10.5281/zenodo.1</identifier>
//!     <titles><title>A note</title></titles>
//!   </resource></payload></oai_datacite></metadata>
//! </record></ListRecords></OAI-PMH>"#;
//!
//! let records = parse_records(xml, MetadataFormat::OaiDatacite3).unwrap();
//! assert_eq!(records[0].doi().unwrap(), "10.5281/zenodo.1");
//! assert_eq!(records[0].title().unwrap(), "A note");
//! ```
//!
//! # Architecture
//!
//! The pipeline runs URL building, one HTTP request, XML parsing and record
//! wrapping, in that order:
//!
//! - [`config`]: Constants, URL building and validation
//! - [`format`]: Supported metadata formats
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for the OAI-PMH endpoint
//! - [`xml`]: Generic XML tree with typed path lookups
//! - [`records`]: Record factory
//! - [`record`]: Record wrappers and accessors
//! - [`output`]: YAML, JSON and text rendering
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod harvester;
pub mod http;
pub mod output;
pub mod record;
pub mod records;
pub mod xml;

// Re-export main functions
pub use harvester::{harvest_collection, harvest_collection_with, HarvestRequest};
pub use records::{parse_records, records_from_document};

// Re-export commonly used items
pub use config::HarvestConfig;
pub use error::{ErrorKind, HarvesterError, Result};
pub use format::MetadataFormat;
pub use record::{Author, Datacite3Record, HarvestedRecord, Record, RecordSummary};
