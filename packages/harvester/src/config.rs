//! Configuration constants, URL building and validation functions.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use reqwest::Url;

use crate::error::{HarvesterError, Result};
use crate::format::MetadataFormat;

/// Zenodo OAI-PMH endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://zenodo.org/oai2d";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum HTTP response size in bytes (50 MB).
///
/// A single `ListRecords` page is far below this. Can be overridden via the
/// CLI `--max-size` flag.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 50 * 1024 * 1024;

/// Zenodo exposes each community as the OAI set `user-<community>`.
pub const COLLECTION_SET_PREFIX: &str = "user-";

/// Text wrap width for the plain-text listing.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Runtime settings for a harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    /// OAI-PMH base URL, without query string.
    pub endpoint: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Maximum accepted response size in bytes.
    pub max_response_size: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: HTTP_TIMEOUT_SECS,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }
}

impl HarvestConfig {
    /// Use a different OAI-PMH endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use a different request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Use a different response size limit.
    #[must_use]
    pub fn with_max_response_size(mut self, max_response_size: u64) -> Self {
        self.max_response_size = max_response_size;
        self
    }
}

/// Validate a collection (community) identifier.
///
/// Any non-blank name is accepted; characters that are not URL-safe are
/// percent-encoded by [`harvest_url`].
///
/// # Examples
/// ```
/// use zenodo_harvester::config::validate_collection;
///
/// assert!(validate_collection("lsst").is_ok());
/// assert!(validate_collection("  ").is_err());
/// ```
pub fn validate_collection(collection: &str) -> Result<()> {
    if collection.trim().is_empty() {
        Err(HarvesterError::InvalidCollection(collection.to_string()))
    } else {
        Ok(())
    }
}

/// Build the `ListRecords` URL for a collection.
///
/// # Arguments
/// * `endpoint` - OAI-PMH base URL (e.g., [`DEFAULT_ENDPOINT`])
/// * `collection` - Community name, sent as the set `user-<collection>`
/// * `format` - Metadata format, sent as `metadataPrefix`
///
/// # Returns
/// URL with percent-encoded query parameters
///
/// # Examples
/// ```
/// use zenodo_harvester::config::{harvest_url, DEFAULT_ENDPOINT};
/// use zenodo_harvester::MetadataFormat;
///
/// let url = harvest_url(DEFAULT_ENDPOINT, "lsst", MetadataFormat::OaiDatacite3).unwrap();
/// assert_eq!(
///     url,
///     "https://zenodo.org/oai2d?verb=ListRecords&metadataPrefix=oai_datacite3&set=user-lsst"
/// );
/// ```
pub fn harvest_url(endpoint: &str, collection: &str, format: MetadataFormat) -> Result<String> {
    let set = format!("{COLLECTION_SET_PREFIX}{collection}");
    let url = Url::parse_with_params(
        endpoint,
        &[
            ("verb", "ListRecords"),
            ("metadataPrefix", format.as_str()),
            ("set", set.as_str()),
        ],
    )
    .map_err(|e| HarvesterError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    Ok(url.into())
}

/// Parse a `YYYY-MM-DD` date.
///
/// The text must match the pattern exactly and name a real calendar day.
///
/// # Examples
/// ```
/// use zenodo_harvester::config::parse_date;
///
/// assert!(parse_date("2016-04-12").is_ok());
/// assert!(parse_date("2016-4-12").is_err());
/// assert!(parse_date("2016-02-30").is_err());
/// ```
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(HarvesterError::InvalidDate(date_str.to_string()));
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| HarvesterError::InvalidDate(date_str.to_string()))
}
