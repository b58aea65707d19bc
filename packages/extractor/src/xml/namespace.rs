//! Namespace resolution for EML documents.
//!
//! EML count files put every element in a default namespace, and tag
//! comparisons must be qualified with it. Declarations are collected in a
//! single pass over the parsed document, so a default namespace declared
//! below the root element is still found.

use std::collections::BTreeMap;
use std::fmt;

use roxmltree::{Document, Node};

use crate::error::{ExtractorError, Result};

/// Reserved prefix that is always in scope and never declared.
const XML_PREFIX: &str = "xml";

/// A resolved namespace, rendered as `{uri}` when qualifying tag names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    uri: String,
}

impl Namespace {
    /// Create a namespace from its URI.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// The namespace URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Qualify a local tag name.
    ///
    /// # Examples
    /// ```
    /// use stemtelling_extractor::xml::Namespace;
    ///
    /// let ns = Namespace::new("urn:oasis:names:tc:evs:schema:eml");
    /// assert_eq!(ns.qualify("Selection"), "{urn:oasis:names:tc:evs:schema:eml}Selection");
    /// ```
    #[must_use]
    pub fn qualify(&self, local: &str) -> String {
        format!("{self}{local}")
    }

    /// Check whether an element's qualified tag is `{uri}local`.
    #[must_use]
    pub fn matches(&self, node: Node<'_, '_>, local: &str) -> bool {
        node.is_element()
            && node.tag_name().name() == local
            && node.tag_name().namespace() == Some(self.uri.as_str())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.uri)
    }
}

/// Collect every namespace declaration in the document.
///
/// Keys are prefixes, with the empty string for the default namespace.
/// When a prefix is declared more than once, the last declaration in
/// document order wins.
pub fn resolve_namespaces(doc: &Document<'_>) -> BTreeMap<String, Namespace> {
    let mut namespaces = BTreeMap::new();

    for node in doc.descendants().filter(|n| n.is_element()) {
        let parent = node.parent_element();
        for ns in node.namespaces() {
            if ns.name() == Some(XML_PREFIX) {
                continue;
            }

            // In-scope namespaces inherited unchanged from the parent are not declarations
            let inherited = parent.is_some_and(|p| {
                p.namespaces()
                    .any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
            });
            if inherited {
                continue;
            }

            namespaces.insert(
                ns.name().unwrap_or_default().to_string(),
                Namespace::new(ns.uri()),
            );
        }
    }

    namespaces
}

/// Resolve the default (unprefixed) namespace of a document.
///
/// # Arguments
/// * `doc` - Parsed document
/// * `document` - Name used in the error when no default namespace exists
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use stemtelling_extractor::xml::default_namespace;
///
/// let doc = Document::parse(r#"<EML xmlns="urn:eml"><Count/></EML>"#).unwrap();
/// assert_eq!(default_namespace(&doc, "test.xml").unwrap().uri(), "urn:eml");
///
/// let bare = Document::parse("<EML/>").unwrap();
/// assert!(default_namespace(&bare, "bare.xml").is_err());
/// ```
pub fn default_namespace(doc: &Document<'_>, document: &str) -> Result<Namespace> {
    resolve_namespaces(doc)
        .remove("")
        .ok_or_else(|| ExtractorError::MissingNamespace {
            document: document.to_string(),
        })
}
