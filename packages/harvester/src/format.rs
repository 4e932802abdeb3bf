//! Supported OAI-PMH metadata formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarvesterError, Result};

/// OAI-PMH metadata format with a registered record handler.
///
/// Each variant is bound to one traversal and one record wrapper in
/// [`crate::records`]. Unknown selectors are rejected when parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataFormat {
    /// Datacite v3 records wrapped in `oai_datacite` envelopes.
    #[default]
    #[serde(rename = "oai_datacite3")]
    OaiDatacite3,
}

impl MetadataFormat {
    /// All formats that have a handler.
    pub const ALL: [MetadataFormat; 1] = [MetadataFormat::OaiDatacite3];

    /// The `metadataPrefix` value sent to the repository.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OaiDatacite3 => "oai_datacite3",
        }
    }
}

impl fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataFormat {
    type Err = HarvesterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| HarvesterError::UnsupportedFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_known_format() {
        let format: MetadataFormat = "oai_datacite3".parse().unwrap();
        assert_eq!(format, MetadataFormat::OaiDatacite3);
        assert_eq!(format.to_string(), "oai_datacite3");
    }

    #[test]
    fn test_default_format() {
        assert_eq!(MetadataFormat::default(), MetadataFormat::OaiDatacite3);
    }

    #[test]
    fn test_parse_unknown_format() {
        let err = "oai_dc".parse::<MetadataFormat>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);

        // Selectors are case sensitive, like OAI-PMH metadata prefixes
        assert!("OAI_DATACITE3".parse::<MetadataFormat>().is_err());
    }
}
