//! Vote-sum consistency check.

use crate::error::{ExtractorError, Result};
use crate::types::ReportingUnitRecord;

/// Check that every party's total equals the sum of its candidates' votes.
///
/// Only meaningful for records extracted with
/// [`ExtractionMode::AllCandidates`](crate::config::ExtractionMode::AllCandidates);
/// callers skip it otherwise.
///
/// # Errors
/// `VoteMismatch` for the first party, in document order, whose total
/// disagrees with its candidates.
pub fn validate_vote_totals(record: &ReportingUnitRecord) -> Result<()> {
    for party in &record.parties {
        let candidate_votes = party.candidate_votes();
        if candidate_votes != u128::from(party.valid_votes) {
            return Err(ExtractorError::VoteMismatch {
                party_id: party.id,
                party_votes: party.valid_votes,
                candidate_votes,
            });
        }
    }
    Ok(())
}
