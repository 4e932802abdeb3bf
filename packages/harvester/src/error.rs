//! Error types for the harvester.
//!
//! Every stage of the pipeline reports through `HarvesterError`. Callers that
//! only care about which stage failed can match on [`HarvesterError::kind`].

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Collection identifier is empty.
    #[error("Invalid collection identifier: '{0}'. Expected a community name (e.g., lsst)")]
    InvalidCollection(String),

    /// Endpoint could not be combined into a request URL.
    #[error("Invalid endpoint URL '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Metadata format has no registered record handler.
    #[error("Unsupported metadata format: '{0}'. Supported formats: oai_datacite3")]
    UnsupportedFormat(String),

    /// HTTP request failed (connection, timeout, client construction).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP request to {url} failed with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Response body exceeds the configured limit.
    #[error("Response from {url} is {size} bytes, exceeding the limit of {limit} bytes")]
    ResponseTooLarge { url: String, size: u64, limit: u64 },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// The repository answered with an OAI-PMH protocol error.
    #[error("OAI-PMH error '{code}': {message}")]
    OaiProtocol { code: String, message: String },

    /// Invalid date format.
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD (e.g., 2016-04-12)")]
    InvalidDate(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Pipeline stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input (collection identifier, endpoint).
    Input,
    /// Network failure or non-success response.
    Transport,
    /// Malformed XML.
    Parse,
    /// Format selector without a handler.
    UnsupportedFormat,
    /// Document lacks an expected field or path.
    Schema,
    /// Date text does not match `YYYY-MM-DD`.
    DateFormat,
    /// Writing or serializing output.
    Output,
}

impl HarvesterError {
    /// Classify the error by pipeline stage.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCollection(_) | Self::InvalidEndpoint { .. } => ErrorKind::Input,
            Self::Http(_) | Self::HttpStatus { .. } | Self::ResponseTooLarge { .. } => {
                ErrorKind::Transport
            }
            Self::XmlParse(_) => ErrorKind::Parse,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::MissingElement { .. } | Self::OaiProtocol { .. } => ErrorKind::Schema,
            Self::InvalidDate(_) => ErrorKind::DateFormat,
            Self::Io(_) | Self::YamlSerialization(_) | Self::JsonSerialization(_) => {
                ErrorKind::Output
            }
        }
    }

    pub(crate) fn missing(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element: element.into(),
            context: context.into(),
        }
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
