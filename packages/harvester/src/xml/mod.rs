//! XML parsing into a generic tree and typed path lookups.
//!
//! The OAI-PMH response is converted once into an owned [`XmlValue`] tree
//! so records can keep their slice of it after the source text is dropped.

mod tree;
mod utils;

pub use tree::{parse_document, XmlMap, XmlValue, ATTRIBUTE_PREFIX, TEXT_KEY};
pub use utils::{direct_text, element_children, get_tag_name};
