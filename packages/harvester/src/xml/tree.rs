//! Generic XML tree: elements become mapping keys, repeated siblings lists.

use roxmltree::{Document, Node};

use super::utils::{direct_text, element_children, get_tag_name};
use crate::error::{HarvesterError, Result};

/// Key holding an element's text when it also has attributes or children.
pub const TEXT_KEY: &str = "#text";

/// Prefix for attribute keys (e.g., `@identifierType`).
pub const ATTRIBUTE_PREFIX: char = '@';

/// A node of the parsed document.
///
/// - an element with text only is `Text`;
/// - an element with attributes or child elements is `Map`;
/// - an empty element without attributes is `Null`;
/// - repeated sibling elements are collected into a `List`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlValue {
    Null,
    Text(String),
    Map(XmlMap),
    List(Vec<XmlValue>),
}

/// Ordered mapping of child names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlMap {
    entries: Vec<(String, XmlValue)>,
}

impl XmlMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a child, turning repeated keys into a `List`.
    pub fn insert(&mut self, key: impl Into<String>, value: XmlValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, XmlValue::List(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, XmlValue::Null);
                *existing = XmlValue::List(vec![first, value]);
            }
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove a child, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<XmlValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl XmlValue {
    /// Look up a direct child by name.
    ///
    /// Returns `None` for anything that is not a `Map`, including lists:
    /// callers pick an item with [`XmlValue::items`] first.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Follow a slash-separated path of child names.
    ///
    /// # Examples
    /// ```
    /// use zenodo_harvester::xml::parse_document;
    ///
    /// let doc = parse_document("<a><b><c>found</c></b></a>").unwrap();
    /// assert_eq!(doc.path("a/b/c").and_then(|v| v.text()), Some("found"));
    /// assert!(doc.path("a/x").is_none());
    /// ```
    #[must_use]
    pub fn path(&self, path: &str) -> Option<&XmlValue> {
        path.split('/').try_fold(self, |current, part| current.get(part))
    }

    /// Follow a path, failing with `MissingElement` at the first absent step.
    ///
    /// # Arguments
    /// * `path` - Slash-separated child names
    /// * `context` - Name of the element `self` represents, for the error
    pub fn require(&self, path: &str, context: &str) -> Result<&XmlValue> {
        let mut current = self;
        let mut location = context.to_string();

        for part in path.split('/') {
            current = current
                .get(part)
                .ok_or_else(|| HarvesterError::missing(part, location.clone()))?;
            location.push('/');
            location.push_str(part);
        }

        Ok(current)
    }

    /// View the value as a sequence.
    ///
    /// A `List` yields its items; any other value is a one-element sequence,
    /// so a single `<title>` and several `<title>`s are read the same way.
    #[must_use]
    pub fn items(&self) -> &[XmlValue] {
        match self {
            Self::List(items) => items.as_slice(),
            other => std::slice::from_ref(other),
        }
    }

    /// Text content: the value itself for `Text`, the `#text` key for `Map`.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Map(map) => map.get(TEXT_KEY).and_then(XmlValue::text),
            _ => None,
        }
    }

    /// Attribute value by name (without the `@` prefix).
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.get(&format!("{ATTRIBUTE_PREFIX}{name}"))
            .and_then(XmlValue::text)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Parse XML text into a generic tree.
///
/// The returned value is a `Map` with the root element as its only key.
/// Namespace prefixes are stripped from element and attribute names.
///
/// # Examples
/// ```
/// use zenodo_harvester::xml::parse_document;
///
/// let doc = parse_document(r#"<r><t lang="en">Hi</t><t>Yo</t></r>"#).unwrap();
/// let titles = doc.path("r/t").unwrap().items();
/// assert_eq!(titles.len(), 2);
/// assert_eq!(titles[0].text(), Some("Hi"));
/// assert_eq!(titles[0].attribute("lang"), Some("en"));
/// ```
pub fn parse_document(xml: &str) -> Result<XmlValue> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let mut map = XmlMap::new();
    map.insert(get_tag_name(root), convert_element(root));

    tracing::trace!(root = get_tag_name(root), "Parsed XML document");
    Ok(XmlValue::Map(map))
}

fn convert_element(node: Node<'_, '_>) -> XmlValue {
    let mut map = XmlMap::new();

    for attr in node.attributes() {
        map.insert(
            format!("{ATTRIBUTE_PREFIX}{}", attr.name()),
            XmlValue::Text(attr.value().to_string()),
        );
    }

    for child in element_children(node) {
        map.insert(get_tag_name(child), convert_element(child));
    }

    let text = direct_text(node);

    if map.is_empty() {
        return if text.is_empty() {
            XmlValue::Null
        } else {
            XmlValue::Text(text)
        };
    }

    if !text.is_empty() {
        map.insert(TEXT_KEY, XmlValue::Text(text));
    }
    XmlValue::Map(map)
}
