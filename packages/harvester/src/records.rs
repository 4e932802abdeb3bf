//! Record factory: turn a parsed `ListRecords` response into records.

use crate::error::{HarvesterError, Result};
use crate::format::MetadataFormat;
use crate::record::{Datacite3Record, Record};
use crate::xml::{parse_document, XmlValue};

/// Root element of every OAI-PMH response.
const OAI_ROOT: &str = "OAI-PMH";

/// Header status of records removed from the repository.
const DELETED_STATUS: &str = "deleted";

/// Parse a `ListRecords` response and wrap its records.
///
/// # Arguments
/// * `xml` - Response body
/// * `format` - Format the records were requested in
///
/// # Returns
/// Records in document order
pub fn parse_records(xml: &str, format: MetadataFormat) -> Result<Vec<Record>> {
    let doc = parse_document(xml)?;
    records_from_document(doc, format)
}

/// Wrap every `<record>` of a parsed `ListRecords` response.
///
/// Records whose header is marked deleted carry no metadata and are skipped.
/// A listing without any remaining record is an error, as is an OAI-PMH
/// `<error>` response.
pub fn records_from_document(doc: XmlValue, format: MetadataFormat) -> Result<Vec<Record>> {
    let XmlValue::Map(mut root) = doc else {
        return Err(HarvesterError::missing(OAI_ROOT, "document"));
    };
    let envelope = root
        .remove(OAI_ROOT)
        .ok_or_else(|| HarvesterError::missing(OAI_ROOT, "document"))?;

    check_protocol_error(&envelope)?;

    let XmlValue::Map(mut envelope) = envelope else {
        return Err(HarvesterError::missing("ListRecords", OAI_ROOT));
    };
    let list = envelope
        .remove("ListRecords")
        .ok_or_else(|| HarvesterError::missing("ListRecords", OAI_ROOT))?;

    let XmlValue::Map(mut list) = list else {
        return Err(HarvesterError::missing("record", "OAI-PMH/ListRecords"));
    };
    warn_if_truncated(list.get("resumptionToken"));

    let records = list
        .remove("record")
        .ok_or_else(|| HarvesterError::missing("record", "OAI-PMH/ListRecords"))?;

    let items = match records {
        XmlValue::List(items) => items,
        single => vec![single],
    };

    let mut wrapped = Vec::with_capacity(items.len());
    for item in items {
        if is_deleted(&item) {
            tracing::debug!(
                identifier = item.path("header/identifier").and_then(XmlValue::text),
                "Skipping deleted record"
            );
            continue;
        }
        wrapped.push(wrap_record(item, format)?);
    }

    if wrapped.is_empty() {
        return Err(HarvesterError::missing("record", "OAI-PMH/ListRecords"));
    }

    tracing::debug!(records = wrapped.len(), format = %format, "Wrapped records");
    Ok(wrapped)
}

fn wrap_record(record: XmlValue, format: MetadataFormat) -> Result<Record> {
    match format {
        MetadataFormat::OaiDatacite3 => Datacite3Record::new(record).map(Record::from),
    }
}

fn is_deleted(record: &XmlValue) -> bool {
    record
        .get("header")
        .and_then(|header| header.attribute("status"))
        == Some(DELETED_STATUS)
}

/// Fail on `<error code="...">` responses such as `noRecordsMatch`.
fn check_protocol_error(envelope: &XmlValue) -> Result<()> {
    let Some(error) = envelope.get("error") else {
        return Ok(());
    };

    let error = error.items().first().unwrap_or(error);
    Err(HarvesterError::OaiProtocol {
        code: error.attribute("code").unwrap_or("unknown").to_string(),
        message: error.text().unwrap_or_default().to_string(),
    })
}

/// Only the first page of a listing is read.
fn warn_if_truncated(token: Option<&XmlValue>) {
    let Some(token) = token.and_then(XmlValue::text) else {
        return;
    };

    tracing::warn!(
        resumption_token = token,
        "Listing continues on further pages which are not harvested"
    );
}
