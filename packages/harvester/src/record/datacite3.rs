//! Records in the `oai_datacite3` format (Datacite kernel v3 payloads).

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use super::{Author, HarvestedRecord};
use crate::config::parse_date;
use crate::error::{HarvesterError, Result};
use crate::xml::XmlValue;

/// Path from a `<record>` element to its Datacite `<resource>`.
pub const RESOURCE_PATH: &str = "metadata/oai_datacite/payload/resource";

/// `descriptionType` of the abstract.
const ABSTRACT_DESCRIPTION_TYPE: &str = "Abstract";

/// `dateType` of the publication date.
const ISSUED_DATE_TYPE: &str = "Issued";

/// Zenodo record derived from Datacite v3 metadata.
///
/// Holds a shared handle to its `<record>` slice of the parsed document.
/// Cloning a record does not copy the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datacite3Record {
    record: Arc<XmlValue>,
}

impl Datacite3Record {
    /// Wrap a `<record>` element.
    ///
    /// Fails with `MissingElement` when the record has no Datacite resource.
    pub fn new(record: XmlValue) -> Result<Self> {
        record.require(RESOURCE_PATH, "record")?;
        Ok(Self {
            record: Arc::new(record),
        })
    }

    /// The raw `<record>` tree.
    #[must_use]
    pub fn raw(&self) -> &XmlValue {
        &self.record
    }

    fn resource(&self) -> Result<&XmlValue> {
        self.record.require(RESOURCE_PATH, "record")
    }

    /// Text of the element at `path` below the resource.
    fn resource_text(&self, path: &str) -> Result<String> {
        let value = self.resource()?.require(path, "resource")?;
        required_text(value, path, "resource")
    }
}

/// Text of a value, failing when the element is empty.
fn required_text(value: &XmlValue, element: &str, context: &str) -> Result<String> {
    value
        .text()
        .map(str::to_string)
        .ok_or_else(|| HarvesterError::missing(format!("{element}/#text"), context))
}

/// Pick the item whose `attribute` equals `preferred`, else the first item.
fn preferred_item<'a>(
    value: &'a XmlValue,
    attribute: &str,
    preferred: &str,
) -> Option<&'a XmlValue> {
    let items = value.items();
    items
        .iter()
        .find(|item| item.attribute(attribute) == Some(preferred))
        .or_else(|| items.first())
}

impl HarvestedRecord for Datacite3Record {
    fn oai_identifier(&self) -> Result<String> {
        let value = self.record.require("header/identifier", "record")?;
        required_text(value, "header/identifier", "record")
    }

    fn datestamp(&self) -> Result<String> {
        let value = self.record.require("header/datestamp", "record")?;
        required_text(value, "header/datestamp", "record")
    }

    fn authors(&self) -> Result<BTreeSet<Author>> {
        let creators = self.resource()?.require("creators/creator", "resource")?;

        creators
            .items()
            .iter()
            .map(|creator| -> Result<Author> {
                let name = creator.require("creatorName", "creator")?;
                let name = required_text(name, "creatorName", "creator")?;

                // Datacite allows several affiliations, the first is kept
                let affiliation = creator
                    .get("affiliation")
                    .and_then(|a| a.items().first())
                    .and_then(XmlValue::text)
                    .map(str::to_string);

                Ok(Author { name, affiliation })
            })
            .collect()
    }

    fn doi(&self) -> Result<String> {
        self.resource_text("identifier")
    }

    fn titles(&self) -> Result<Vec<String>> {
        let titles = self.resource()?.require("titles/title", "resource")?;

        titles
            .items()
            .iter()
            .map(|title| required_text(title, "title", "resource/titles"))
            .collect()
    }

    fn title(&self) -> Result<String> {
        let titles = self.resource()?.require("titles/title", "resource")?;
        let first = titles
            .items()
            .first()
            .ok_or_else(|| HarvesterError::missing("title", "resource/titles"))?;
        required_text(first, "title", "resource/titles")
    }

    fn abstract_html(&self) -> Result<String> {
        let descriptions = self
            .resource()?
            .require("descriptions/description", "resource")?;
        let description =
            preferred_item(descriptions, "descriptionType", ABSTRACT_DESCRIPTION_TYPE)
                .ok_or_else(|| HarvesterError::missing("description", "resource/descriptions"))?;
        required_text(description, "description", "resource/descriptions")
    }

    fn date(&self) -> Result<NaiveDate> {
        let dates = self.resource()?.require("dates/date", "resource")?;
        let date = preferred_item(dates, "dateType", ISSUED_DATE_TYPE)
            .ok_or_else(|| HarvesterError::missing("date", "resource/dates"))?;
        let text = required_text(date, "date", "resource/dates")?;
        parse_date(&text)
    }

    fn publisher(&self) -> Result<String> {
        self.resource_text("publisher")
    }

    fn publication_year(&self) -> Result<i32> {
        let year = self.resource_text("publicationYear")?;
        year.parse()
            .map_err(|_| HarvesterError::InvalidDate(year.clone()))
    }

    fn subjects(&self) -> Vec<String> {
        let Ok(resource) = self.resource() else {
            return Vec::new();
        };

        resource
            .path("subjects/subject")
            .map(|subjects| {
                subjects
                    .items()
                    .iter()
                    .filter_map(XmlValue::text)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
