//! Main harvester service that ties all components together.

use crate::config::{harvest_url, validate_collection, HarvestConfig};
use crate::error::Result;
use crate::format::MetadataFormat;
use crate::http::{bytes_to_string, create_client, download_bytes};
use crate::record::Record;
use crate::records::parse_records;

/// What to harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestRequest {
    /// Community name (e.g., "lsst").
    pub collection: String,

    /// Metadata format to request and parse.
    pub format: MetadataFormat,
}

impl HarvestRequest {
    /// Create a request for a collection in the default format.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            format: MetadataFormat::default(),
        }
    }

    /// Request a specific format.
    #[must_use]
    pub fn with_format(mut self, format: MetadataFormat) -> Self {
        self.format = format;
        self
    }
}

/// Harvest a Zenodo community from the default endpoint.
///
/// # Arguments
/// * `collection` - Community name (e.g., "lsst")
/// * `format` - Metadata format, usually [`MetadataFormat::OaiDatacite3`]
///
/// # Returns
/// Records in the order the repository listed them
pub fn harvest_collection(collection: &str, format: MetadataFormat) -> Result<Vec<Record>> {
    let request = HarvestRequest::new(collection).with_format(format);
    harvest_collection_with(&HarvestConfig::default(), &request)
}

/// Harvest a community with an explicit configuration.
///
/// Issues exactly one request. Only the first page of the listing is read.
pub fn harvest_collection_with(
    config: &HarvestConfig,
    request: &HarvestRequest,
) -> Result<Vec<Record>> {
    validate_collection(&request.collection)?;

    let url = harvest_url(&config.endpoint, &request.collection, request.format)?;
    tracing::info!(collection = %request.collection, format = %request.format, %url, "Harvesting collection");

    let client = create_client(config)?;
    let bytes = download_bytes(&client, &url, config.max_response_size)?;
    let xml = bytes_to_string(&bytes, &format!("ListRecords for {}", request.collection));

    let records = parse_records(&xml, request.format)?;
    tracing::info!(collection = %request.collection, records = records.len(), "Harvest complete");

    Ok(records)
}
