//! Per-document processing that ties the extraction steps together.
//!
//! A document is parsed once, its default namespace resolved, and every
//! reporting unit is run through extract, validate and flatten on its own.
//! A failing unit is recorded and contributes no rows; its siblings carry on.

use roxmltree::{Document, Node};

use crate::config::{ExtractOptions, MismatchPolicy, REPORTING_UNIT_PATH};
use crate::error::{ExtractorError, Result};
use crate::extract::{extract_labelled, reporting_unit_id};
use crate::flatten::flatten_record;
use crate::types::FlatRow;
use crate::validate::validate_vote_totals;
use crate::xml::{default_namespace, find_all_by_path, Namespace};

/// A reporting unit that produced no rows because of an error.
#[derive(Debug)]
pub struct UnitFailure {
    /// Position of the unit within the document (0-based).
    pub index: usize,

    /// Unit id, when the identifier element could be read.
    pub unit_id: Option<String>,

    /// Why the unit failed.
    pub error: ExtractorError,
}

/// Result of processing one document.
#[derive(Debug, Default)]
pub struct DocumentOutcome {
    /// Number of reporting units found.
    pub units_seen: usize,

    /// Rows from all units that succeeded, in document order.
    pub rows: Vec<FlatRow>,

    /// Units that failed.
    pub unit_failures: Vec<UnitFailure>,

    /// Non-fatal issues, such as tolerated vote mismatches.
    pub warnings: Vec<String>,
}

/// Find every reporting unit subtree in a document.
///
/// Follows `Count/Election/Contests/Contest/ReportingUnitVotes` from the
/// root element. A document without that path has no units.
pub fn find_reporting_units<'a, 'input>(
    doc: &'a Document<'input>,
    ns: &Namespace,
) -> Vec<Node<'a, 'input>> {
    find_all_by_path(doc.root_element(), ns, &REPORTING_UNIT_PATH)
}

/// Process a document given as XML text.
///
/// # Arguments
/// * `xml` - Document contents
/// * `document` - Name used in errors and log messages (usually the file name)
/// * `options` - Extraction mode and mismatch policy
///
/// # Errors
/// `XmlParse` if the text is not well-formed XML, `MissingNamespace` if
/// it declares no default namespace. Unit-level errors are collected in
/// the outcome instead.
pub fn process_document(
    xml: &str,
    document: &str,
    options: ExtractOptions,
) -> Result<DocumentOutcome> {
    let doc = Document::parse(xml)?;
    let ns = default_namespace(&doc, document)?;
    let units = find_reporting_units(&doc, &ns);

    let mut outcome = DocumentOutcome {
        units_seen: units.len(),
        ..DocumentOutcome::default()
    };

    for (index, unit) in units.into_iter().enumerate() {
        let unit_label = reporting_unit_id(unit, &ns);
        let unit_id = unit_label.map(String::from);

        match process_unit(unit, &ns, unit_label, options) {
            Ok((rows, warning)) => {
                outcome.rows.extend(rows);
                if let Some(warning) = warning {
                    outcome.warnings.push(format!(
                        "Reporting unit {}: {warning}",
                        unit_id.as_deref().unwrap_or("<unknown>")
                    ));
                }
            }
            Err(error) => {
                tracing::warn!(
                    document,
                    unit = unit_id.as_deref().unwrap_or("<unknown>"),
                    error = %error,
                    "Reporting unit failed, skipping"
                );
                outcome.unit_failures.push(UnitFailure {
                    index,
                    unit_id,
                    error,
                });
            }
        }
    }

    tracing::debug!(
        document,
        namespace = %ns,
        units = outcome.units_seen,
        rows = outcome.rows.len(),
        failures = outcome.unit_failures.len(),
        "Processed document"
    );

    Ok(outcome)
}

/// Extract, optionally validate, and flatten a single unit.
///
/// Returns the rows plus a warning when a vote mismatch was tolerated.
fn process_unit(
    unit: Node<'_, '_>,
    ns: &Namespace,
    unit_label: Option<&str>,
    options: ExtractOptions,
) -> Result<(Vec<FlatRow>, Option<String>)> {
    let record = extract_labelled(unit, ns, options.mode, unit_label)?;

    let mut warning = None;
    if options.mode.requires_validation() {
        if let Err(error) = validate_vote_totals(&record) {
            match options.mismatch_policy {
                MismatchPolicy::Reject => return Err(error),
                MismatchPolicy::Warn => {
                    tracing::warn!(error = %error, "Vote totals do not add up");
                    warning = Some(error.to_string());
                }
            }
        }
    }

    let rows = flatten_record(&record)?;
    Ok((rows, warning))
}
