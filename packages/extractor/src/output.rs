//! CSV output for the flattened dataset.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::types::DatasetRow;

/// Output columns, in the order `DatasetRow` serializes its fields.
pub const CSV_COLUMNS: [&str; 8] = [
    "ReportingUnitName",
    "PartyNumber",
    "ReportingUnitIdentifier",
    "PartyName",
    "CandidateID",
    "Votes",
    "TotalVotesForParty",
    "CouncilName",
];

/// Write rows as CSV with a header line.
///
/// The header is written even when there are no rows.
pub fn write_csv<W: Write>(rows: &[DatasetRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Save rows to a CSV file, replacing any existing file.
pub fn save_csv(rows: &[DatasetRow], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(rows, file)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Saved CSV");
    Ok(())
}
