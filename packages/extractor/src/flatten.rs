//! Flattening of nested reporting unit records into rows.

use crate::error::{ExtractorError, Result};
use crate::types::{FlatRow, ReportingUnitRecord};

/// Turn a record into one row per (party, candidate) pair.
///
/// Rows follow party order, then candidate attachment order. Unit and
/// party fields are copied into every row. A party without candidates
/// contributes no rows.
///
/// # Errors
/// `Structural` when the record has no unit identity, so an unidentified
/// unit never yields rows.
pub fn flatten_record(record: &ReportingUnitRecord) -> Result<Vec<FlatRow>> {
    let (Some(unit_id), Some(unit_name)) = (&record.unit_id, &record.unit_name) else {
        return Err(ExtractorError::structural(
            "reporting unit has no ReportingUnitIdentifier",
        ));
    };

    let rows = record
        .parties
        .iter()
        .flat_map(|party| {
            party.candidates.iter().map(move |candidate| FlatRow {
                unit_id: unit_id.clone(),
                unit_name: unit_name.clone(),
                party_id: party.id,
                party_name: party.registered_name.clone(),
                candidate_id: candidate.id,
                candidate_votes: candidate.valid_votes,
                party_total_votes: party.valid_votes,
            })
        })
        .collect();

    Ok(rows)
}
