//! Harvested records with typed accessors.
//!
//! Every supported [`MetadataFormat`] has one wrapper type implementing
//! [`HarvestedRecord`]. [`Record`] is the closed set of those wrappers, as
//! returned by the record factory.

mod datacite3;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

pub use datacite3::Datacite3Record;

use crate::error::Result;
use crate::format::MetadataFormat;

/// A creator of a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Author {
    /// Name as given by the repository (e.g., "Sick, Jonathan").
    pub name: String,

    /// Affiliation, when the record lists one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
}

impl Author {
    /// Create an author.
    pub fn new(name: impl Into<String>, affiliation: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            affiliation: affiliation.map(Into::into),
        }
    }
}

/// Read access to one harvested record.
///
/// Accessors read the parsed document on every call; they never perform I/O
/// and return the same result when called again.
pub trait HarvestedRecord {
    /// OAI-PMH identifier from the record header (e.g., `oai:zenodo.org:45009`).
    fn oai_identifier(&self) -> Result<String>;

    /// Header datestamp of the last change, as sent by the repository.
    fn datestamp(&self) -> Result<String>;

    /// Set of creators.
    fn authors(&self) -> Result<BTreeSet<Author>>;

    /// Persistent identifier.
    fn doi(&self) -> Result<String>;

    /// All titles in document order.
    fn titles(&self) -> Result<Vec<String>>;

    /// The first title in document order.
    fn title(&self) -> Result<String>;

    /// Abstract, possibly containing HTML markup.
    fn abstract_html(&self) -> Result<String>;

    /// Publication date.
    fn date(&self) -> Result<NaiveDate>;

    /// Publishing organisation.
    fn publisher(&self) -> Result<String>;

    /// Publication year.
    fn publication_year(&self) -> Result<i32>;

    /// Subject keywords; empty when the record has none.
    fn subjects(&self) -> Vec<String>;

    /// Snapshot of all fields for output.
    ///
    /// Fails when a required field is missing; `publisher` is optional here.
    fn summarize(&self) -> Result<RecordSummary> {
        Ok(RecordSummary {
            oai_identifier: self.oai_identifier()?,
            datestamp: self.datestamp()?,
            doi: self.doi()?,
            title: self.title()?,
            authors: self.authors()?.into_iter().collect(),
            date: self.date()?,
            publisher: self.publisher().ok(),
            subjects: self.subjects(),
            abstract_html: self.abstract_html()?,
        })
    }
}

/// Serializable view of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub oai_identifier: String,
    pub datestamp: String,
    pub doi: String,
    pub title: String,
    pub authors: Vec<Author>,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,
    pub abstract_html: String,
}

/// A harvested record of any supported format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Datacite3(Datacite3Record),
}

impl Record {
    /// Format the record was harvested in.
    #[must_use]
    pub fn format(&self) -> MetadataFormat {
        match self {
            Self::Datacite3(_) => MetadataFormat::OaiDatacite3,
        }
    }

    fn inner(&self) -> &dyn HarvestedRecord {
        match self {
            Self::Datacite3(record) => record,
        }
    }
}

impl From<Datacite3Record> for Record {
    fn from(record: Datacite3Record) -> Self {
        Self::Datacite3(record)
    }
}

impl HarvestedRecord for Record {
    fn oai_identifier(&self) -> Result<String> {
        self.inner().oai_identifier()
    }

    fn datestamp(&self) -> Result<String> {
        self.inner().datestamp()
    }

    fn authors(&self) -> Result<BTreeSet<Author>> {
        self.inner().authors()
    }

    fn doi(&self) -> Result<String> {
        self.inner().doi()
    }

    fn titles(&self) -> Result<Vec<String>> {
        self.inner().titles()
    }

    fn title(&self) -> Result<String> {
        self.inner().title()
    }

    fn abstract_html(&self) -> Result<String> {
        self.inner().abstract_html()
    }

    fn date(&self) -> Result<NaiveDate> {
        self.inner().date()
    }

    fn publisher(&self) -> Result<String> {
        self.inner().publisher()
    }

    fn publication_year(&self) -> Result<i32> {
        self.inner().publication_year()
    }

    fn subjects(&self) -> Vec<String> {
        self.inner().subjects()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_ordering() {
        let a = Author::new("Sick, Jonathan", Some("LSST"));
        let b = Author::new("Sick, Jonathan", None::<String>);
        let c = Author::new("Bosch, Jim", Some("Princeton"));

        let set: BTreeSet<_> = [a.clone(), b.clone(), c.clone(), a.clone()].into();
        assert_eq!(set.len(), 3);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![c, b, a]);
    }

    #[test]
    fn test_author_serialization_skips_missing_affiliation() {
        let author = Author::new("Sick, Jonathan", None::<String>);
        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Sick, Jonathan" }));
    }
}
