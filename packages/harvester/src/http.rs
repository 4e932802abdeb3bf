//! HTTP client wrapper for talking to the OAI-PMH endpoint.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HarvestConfig;
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("zenodo-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` with the configured timeout and user agent.
pub fn create_client(config: &HarvestConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL with a single GET.
///
/// Every non-success status is an error. There is no retry.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `max_size` - Maximum accepted body size in bytes
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    tracing::debug!(url, "Sending request");
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, status = %status, "Request failed");
        return Err(HarvesterError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    // Reject early when the server announces the size
    if let Some(length) = response.content_length() {
        check_size(url, length, max_size)?;
    }

    let bytes = response.bytes()?;
    check_size(url, bytes.len() as u64, max_size)?;

    tracing::debug!(url, status = %status, bytes = bytes.len(), "Received response");
    Ok(bytes.to_vec())
}

fn check_size(url: &str, size: u64, limit: u64) -> Result<()> {
    if size > limit {
        return Err(HarvesterError::ResponseTooLarge {
            url: url.to_string(),
            size,
            limit,
        });
    }
    Ok(())
}

/// Convert bytes to a string, logging when invalid UTF-8 was replaced.
///
/// # Arguments
/// * `bytes` - Raw response body
/// * `context` - Description used in the log message
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::warn!(context, error = %e, "Response is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
