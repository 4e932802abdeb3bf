//! Helpers for reading `roxmltree` nodes.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Tag name without namespace (e.g., "resource" not "{ns}resource")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use zenodo_harvester::xml::get_tag_name;
///
/// let xml = r#"<oai:record xmlns:oai="http://www.openarchives.org/OAI/2.0/"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "record");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get all element children of a node.
///
/// # Returns
/// Iterator over element children (excludes text nodes, comments, etc.)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Concatenate the text nodes directly below an element, trimmed.
///
/// Text inside child elements is not included. CDATA sections are text
/// nodes and are included.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use zenodo_harvester::xml::direct_text;
///
/// let doc = Document::parse("<title> Hello <sub>x</sub> world </title>").unwrap();
/// assert_eq!(direct_text(doc.root_element()), "Hello  world");
/// ```
pub fn direct_text(node: Node<'_, '_>) -> String {
    let mut text = String::new();

    for child in node.children().filter(|c| c.is_text()) {
        if let Some(t) = child.text() {
            text.push_str(t);
        }
    }

    text.trim().to_string()
}
