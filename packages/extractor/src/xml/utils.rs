//! XML utility functions for navigating and extracting data from DOM trees.
//!
//! All lookups are namespace-qualified: a child only matches when both its
//! local name and its namespace URI agree.

use roxmltree::Node;

use super::namespace::Namespace;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use stemtelling_extractor::xml::get_tag_name;
///
/// let xml = r#"<EML xmlns="urn:eml"><Count/></EML>"#;
/// let doc = Document::parse(xml).unwrap();
/// let count = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(count), "Count");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the tag name qualified with its namespace as `{uri}local`.
///
/// Elements without a namespace return the bare local name.
pub fn qualified_tag_name(node: Node<'_, '_>) -> String {
    match node.tag_name().namespace() {
        Some(uri) => Namespace::new(uri).qualify(get_tag_name(node)),
        None => get_tag_name(node).to_string(),
    }
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

/// Find the first child element with the given qualified tag.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use stemtelling_extractor::xml::{find_child, Namespace};
///
/// let xml = r#"<Selection xmlns="urn:eml"><ValidVotes>12</ValidVotes></Selection>"#;
/// let doc = Document::parse(xml).unwrap();
/// let ns = Namespace::new("urn:eml");
///
/// assert!(find_child(doc.root_element(), &ns, "ValidVotes").is_some());
/// assert!(find_child(doc.root_element(), &ns, "Candidate").is_none());
/// ```
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &Namespace,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|child| ns.matches(*child, tag))
}

/// Find every element reached by following a path of qualified tags.
///
/// Each step fans out over all matching children, so
/// `["Contests", "Contest"]` yields every contest of every contests block.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use stemtelling_extractor::xml::{find_all_by_path, Namespace};
///
/// let xml = r#"<Count xmlns="urn:eml"><Election><Contests>
///     <Contest/><Contest/>
/// </Contests></Election></Count>"#;
/// let doc = Document::parse(xml).unwrap();
/// let ns = Namespace::new("urn:eml");
///
/// let contests = find_all_by_path(doc.root_element(), &ns, &["Election", "Contests", "Contest"]);
/// assert_eq!(contests.len(), 2);
/// ```
pub fn find_all_by_path<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &Namespace,
    path: &[&str],
) -> Vec<Node<'a, 'input>> {
    let mut current = vec![node];

    for part in path {
        current = current
            .into_iter()
            .flat_map(|n| n.children().filter(move |child| ns.matches(*child, part)))
            .collect();
    }

    current
}

/// Get the text content of a node, trimmed.
///
/// # Returns
/// Trimmed text content, or empty string if no text
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}
