//! Core data types for the extractor.
//!
//! A `ReportingUnitRecord` is the nested result of reading one
//! `ReportingUnitVotes` subtree. `FlatRow` is its tabular form, and
//! `DatasetRow` is a flat row tagged with the council it came from.

use serde::Serialize;

use crate::error::{DuplicateKey, ExtractorError, Result};

/// Votes for a single candidate within a party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateTally {
    /// Candidate id, unique within the party.
    pub id: u32,

    /// Valid votes cast for this candidate.
    pub valid_votes: u64,
}

/// A party's own recorded total plus its attached candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyTally {
    /// Affiliation id, unique within the reporting unit.
    pub id: u32,

    /// Registered party name.
    pub registered_name: String,

    /// Party total as recorded in the document.
    pub valid_votes: u64,

    /// Candidates in attachment order.
    pub candidates: Vec<CandidateTally>,
}

impl PartyTally {
    /// Create a party without candidates.
    #[must_use]
    pub fn new(id: u32, registered_name: impl Into<String>, valid_votes: u64) -> Self {
        Self {
            id,
            registered_name: registered_name.into(),
            valid_votes,
            candidates: Vec::new(),
        }
    }

    /// Attach a candidate, rejecting an id already present in this party.
    pub fn add_candidate(&mut self, candidate: CandidateTally) -> Result<()> {
        if self.candidates.iter().any(|c| c.id == candidate.id) {
            return Err(ExtractorError::DuplicateKey(DuplicateKey::Candidate {
                party_id: self.id,
                candidate_id: candidate.id,
            }));
        }
        self.candidates.push(candidate);
        Ok(())
    }

    /// Sum of the attached candidates' votes.
    ///
    /// Widened to `u128` so the sum of any number of `u64` counts fits.
    #[must_use]
    pub fn candidate_votes(&self) -> u128 {
        self.candidates.iter().map(|c| u128::from(c.valid_votes)).sum()
    }
}

/// Nested extraction result for one reporting unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportingUnitRecord {
    /// `Id` attribute of the unit identifier, if the subtree had one.
    pub unit_id: Option<String>,

    /// Text of the unit identifier, if the subtree had one.
    pub unit_name: Option<String>,

    /// Parties in document order.
    pub parties: Vec<PartyTally>,
}

impl ReportingUnitRecord {
    /// Party ids in document order.
    pub fn party_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.parties.iter().map(|p| p.id)
    }

    /// Look up a party by id.
    #[must_use]
    pub fn party(&self, id: u32) -> Option<&PartyTally> {
        self.parties.iter().find(|p| p.id == id)
    }

    /// Append a party, rejecting an id already present in this unit.
    ///
    /// Returns the index of the new party.
    pub fn add_party(&mut self, party: PartyTally) -> Result<usize> {
        if self.party(party.id).is_some() {
            return Err(ExtractorError::DuplicateKey(DuplicateKey::Party {
                party_id: party.id,
            }));
        }
        self.parties.push(party);
        Ok(self.parties.len() - 1)
    }
}

/// One (reporting unit, party, candidate) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub unit_id: String,
    pub unit_name: String,
    pub party_id: u32,
    pub party_name: String,
    pub candidate_id: u32,
    pub candidate_votes: u64,
    pub party_total_votes: u64,
}

/// A flat row tagged with its council, in output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRow {
    #[serde(rename = "ReportingUnitName")]
    pub unit_name: String,

    #[serde(rename = "PartyNumber")]
    pub party_id: u32,

    #[serde(rename = "ReportingUnitIdentifier")]
    pub unit_id: String,

    #[serde(rename = "PartyName")]
    pub party_name: String,

    #[serde(rename = "CandidateID")]
    pub candidate_id: u32,

    #[serde(rename = "Votes")]
    pub candidate_votes: u64,

    #[serde(rename = "TotalVotesForParty")]
    pub party_total_votes: u64,

    #[serde(rename = "CouncilName")]
    pub council_name: String,
}

impl DatasetRow {
    /// Tag a flat row with its council name.
    #[must_use]
    pub fn new(row: FlatRow, council_name: impl Into<String>) -> Self {
        Self {
            unit_name: row.unit_name,
            party_id: row.party_id,
            unit_id: row.unit_id,
            party_name: row.party_name,
            candidate_id: row.candidate_id,
            candidate_votes: row.candidate_votes,
            party_total_votes: row.party_total_votes,
            council_name: council_name.into(),
        }
    }
}
