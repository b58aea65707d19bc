//! Helpers for looking inside unfamiliar count documents.

use std::collections::BTreeSet;

use roxmltree::{Document, Node};

use crate::xml::{element_children, qualified_tag_name};

/// Indentation per tree level.
const TREE_INDENT: usize = 4;

/// Collect the distinct qualified tags used in a document, sorted.
pub fn unique_tags(doc: &Document<'_>) -> BTreeSet<String> {
    doc.descendants()
        .filter(|n| n.is_element())
        .map(qualified_tag_name)
        .collect()
}

/// Render the element tree below `node`, one qualified tag per line.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use stemtelling_extractor::inspect::render_tree;
///
/// let doc = Document::parse("<a><b><c/></b><d/></a>").unwrap();
/// assert_eq!(render_tree(doc.root_element()), "a\n    b\n        c\n    d\n");
/// ```
pub fn render_tree(node: Node<'_, '_>) -> String {
    let mut out = String::new();
    render_into(node, 0, &mut out);
    out
}

fn render_into(node: Node<'_, '_>, indent: usize, out: &mut String) {
    out.push_str(&" ".repeat(indent));
    out.push_str(&qualified_tag_name(node));
    out.push('\n');

    for child in element_children(node) {
        render_into(child, indent + TREE_INDENT, out);
    }
}
