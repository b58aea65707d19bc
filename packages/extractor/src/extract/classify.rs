//! Structural classification of `Selection` nodes.
//!
//! EML does not tag a Selection as "party" or "candidate". A party
//! Selection is recognised by a `RegisteredName` grandchild, a candidate
//! Selection by a `Candidate` child. Classification happens before any
//! field is read so the extractor only deals with known shapes.

use roxmltree::Node;

use crate::config::{TAG_CANDIDATE, TAG_REGISTERED_NAME};
use crate::xml::{element_children, find_child, Namespace};

/// What a `Selection` node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Defines a party: affiliation id, registered name and party total.
    Party,
    /// Votes for one candidate of the current party.
    Candidate,
    /// Neither shape; ignored.
    Unrecognized,
}

/// Classify a `Selection` node by inspecting its children.
///
/// A `RegisteredName` grandchild takes precedence over a `Candidate` child.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use stemtelling_extractor::extract::{classify_selection, SelectionKind};
/// use stemtelling_extractor::xml::Namespace;
///
/// let xml = r#"<Selection xmlns="urn:eml">
///     <Candidate><CandidateIdentifier Id="1"/></Candidate>
///     <ValidVotes>3</ValidVotes>
/// </Selection>"#;
/// let doc = Document::parse(xml).unwrap();
/// let ns = Namespace::new("urn:eml");
/// assert_eq!(classify_selection(doc.root_element(), &ns), SelectionKind::Candidate);
/// ```
pub fn classify_selection(selection: Node<'_, '_>, ns: &Namespace) -> SelectionKind {
    let defines_party = element_children(selection)
        .any(|child| find_child(child, ns, TAG_REGISTERED_NAME).is_some());

    if defines_party {
        SelectionKind::Party
    } else if find_child(selection, ns, TAG_CANDIDATE).is_some() {
        SelectionKind::Candidate
    } else {
        SelectionKind::Unrecognized
    }
}
