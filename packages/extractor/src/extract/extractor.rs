//! Extraction of a single `ReportingUnitVotes` subtree.

use std::str::FromStr;

use roxmltree::Node;

use super::classify::{classify_selection, SelectionKind};
use crate::config::{
    ExtractionMode, ATTR_ID, TAG_AFFILIATION_IDENTIFIER, TAG_CANDIDATE,
    TAG_REPORTING_UNIT_IDENTIFIER, TAG_SELECTION, TAG_VALID_VOTES,
};
use crate::error::{ExtractorError, Result};
use crate::types::{CandidateTally, PartyTally, ReportingUnitRecord};
use crate::xml::{element_children, find_child, get_attribute, get_text, Namespace};

/// State carried from one child of the reporting unit to the next.
///
/// Candidate Selections attach to the party defined by the closest
/// preceding party Selection, so the walk is order dependent.
#[derive(Debug, Default)]
struct WalkState {
    record: ReportingUnitRecord,

    /// Index into `record.parties` of the party candidates attach to.
    current_party: Option<usize>,

    /// Candidate Selections processed since the last party Selection.
    candidates_since_party: usize,
}

impl WalkState {
    fn visit(mut self, child: Node<'_, '_>, ns: &Namespace, mode: ExtractionMode) -> Result<Self> {
        if ns.matches(child, TAG_REPORTING_UNIT_IDENTIFIER) {
            self.read_identifier(child)?;
        } else if ns.matches(child, TAG_SELECTION) {
            match classify_selection(child, ns) {
                SelectionKind::Party => self.read_party(child, ns)?,
                SelectionKind::Candidate => self.read_candidate(child, ns, mode)?,
                SelectionKind::Unrecognized => {}
            }
        }
        Ok(self)
    }

    fn read_identifier(&mut self, node: Node<'_, '_>) -> Result<()> {
        if self.record.unit_id.is_some() {
            return Err(ExtractorError::structural(
                "ReportingUnitIdentifier appears more than once",
            ));
        }

        let id = get_attribute(node, ATTR_ID).ok_or_else(|| {
            ExtractorError::structural("ReportingUnitIdentifier has no Id attribute")
        })?;
        self.record.unit_id = Some(id.to_string());
        self.record.unit_name = Some(get_text(node));
        Ok(())
    }

    fn read_party(&mut self, selection: Node<'_, '_>, ns: &Namespace) -> Result<()> {
        self.current_party = None;
        self.candidates_since_party = 0;

        // Affiliation seen but not yet closed by its ValidVotes sibling
        let mut open: Option<(u32, String)> = None;

        for child in element_children(selection) {
            if ns.matches(child, TAG_AFFILIATION_IDENTIFIER) {
                if let Some((party_id, _)) = open.take() {
                    return Err(missing_party_votes(party_id));
                }
                let party_id = parse_id(child, "AffiliationIdentifier Id")?;
                let name = child.first_element_child().map(get_text).ok_or_else(|| {
                    ExtractorError::structural(format!(
                        "AffiliationIdentifier {party_id} has no registered name"
                    ))
                })?;
                open = Some((party_id, name));
            } else if ns.matches(child, TAG_VALID_VOTES) {
                let (party_id, name) = open.take().ok_or_else(|| {
                    ExtractorError::structural("party ValidVotes without a preceding AffiliationIdentifier")
                })?;
                let votes = parse_votes(child, "party ValidVotes")?;
                let index = self.record.add_party(PartyTally::new(party_id, name, votes))?;
                self.current_party = Some(index);
            }
        }

        match open {
            Some((party_id, _)) => Err(missing_party_votes(party_id)),
            None => Ok(()),
        }
    }

    fn read_candidate(
        &mut self,
        selection: Node<'_, '_>,
        ns: &Namespace,
        mode: ExtractionMode,
    ) -> Result<()> {
        if mode == ExtractionMode::FirstCandidateOnly && self.candidates_since_party > 0 {
            return Ok(());
        }

        let party = self
            .current_party
            .and_then(|index| self.record.parties.get_mut(index))
            .ok_or_else(|| {
                ExtractorError::structural("candidate Selection before any party Selection")
            })?;

        let identifier = find_child(selection, ns, TAG_CANDIDATE)
            .and_then(|candidate| candidate.first_element_child())
            .ok_or_else(|| {
                ExtractorError::structural(format!(
                    "Candidate of party {} has no identifier",
                    party.id
                ))
            })?;
        let candidate_id = parse_id(identifier, "CandidateIdentifier Id")?;

        let votes_node = find_child(selection, ns, TAG_VALID_VOTES).ok_or_else(|| {
            ExtractorError::structural(format!(
                "candidate {candidate_id} of party {} has no ValidVotes",
                party.id
            ))
        })?;
        let valid_votes = parse_votes(votes_node, "candidate ValidVotes")?;

        party.add_candidate(CandidateTally {
            id: candidate_id,
            valid_votes,
        })?;
        self.candidates_since_party += 1;
        Ok(())
    }
}

fn missing_party_votes(party_id: u32) -> ExtractorError {
    ExtractorError::structural(format!("party {party_id} has no ValidVotes"))
}

fn parse_number<T: FromStr>(raw: &str, field: &'static str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ExtractorError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_id(node: Node<'_, '_>, field: &'static str) -> Result<u32> {
    let raw = get_attribute(node, ATTR_ID)
        .ok_or_else(|| ExtractorError::structural(format!("missing {field}")))?;
    parse_number(raw, field)
}

fn parse_votes(node: Node<'_, '_>, field: &'static str) -> Result<u64> {
    parse_number(&get_text(node), field)
}

/// Extract a reporting unit subtree into a nested record.
///
/// Walks the direct children of `unit` in document order. The identifier
/// child sets the unit identity; party Selections open a new party;
/// candidate Selections attach to the most recent party. In
/// `FirstCandidateOnly` mode only the first candidate after each party is
/// kept.
///
/// # Arguments
/// * `unit` - A `ReportingUnitVotes` element
/// * `ns` - Default namespace of the document
/// * `mode` - Which candidates to keep
///
/// # Errors
/// `Structural` for a candidate with no party context or missing
/// sub-elements, `DuplicateKey` for repeated ids, `InvalidNumber` for
/// ids or vote counts that do not parse.
pub fn extract_reporting_unit(
    unit: Node<'_, '_>,
    ns: &Namespace,
    mode: ExtractionMode,
) -> Result<ReportingUnitRecord> {
    extract_labelled(unit, ns, mode, reporting_unit_id(unit, ns))
}

/// `Id` of the unit's identifier element, read ahead of the walk.
pub(crate) fn reporting_unit_id<'a>(unit: Node<'a, '_>, ns: &Namespace) -> Option<&'a str> {
    find_child(unit, ns, TAG_REPORTING_UNIT_IDENTIFIER)
        .and_then(|identifier| get_attribute(identifier, ATTR_ID))
}

/// Extract with a unit id already looked up, used to label structural errors.
pub(crate) fn extract_labelled(
    unit: Node<'_, '_>,
    ns: &Namespace,
    mode: ExtractionMode,
    unit_label: Option<&str>,
) -> Result<ReportingUnitRecord> {
    let state = element_children(unit)
        .try_fold(WalkState::default(), |state, child| state.visit(child, ns, mode))
        .map_err(|e| e.in_unit(unit_label))?;

    tracing::debug!(
        unit = unit_label.unwrap_or("<unknown>"),
        parties = state.record.parties.len(),
        "Extracted reporting unit"
    );

    Ok(state.record)
}
