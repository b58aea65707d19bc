//! Aggregation of many count documents into one dataset.
//!
//! Each document is processed on its own and its rows are appended, tagged
//! with the council derived from the file name. Document and unit failures
//! are kept next to the rows so they can be reported after the run.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{council_name_from_path, ExtractOptions, DOCUMENT_EXTENSION};
use crate::document::{process_document, DocumentOutcome, UnitFailure};
use crate::error::{ExtractorError, Result};
use crate::types::DatasetRow;

/// A document that could not be processed at all.
#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: ExtractorError,
}

/// A failed reporting unit together with the document it belongs to.
#[derive(Debug)]
pub struct DocumentUnitFailure {
    pub path: PathBuf,
    pub failure: UnitFailure,
}

/// Rows and failure report of a multi-document run.
#[derive(Debug, Default)]
pub struct Dataset {
    /// All rows, in document order and then unit order.
    pub rows: Vec<DatasetRow>,

    /// Documents processed without a document-level failure.
    pub documents_processed: usize,

    /// Documents that produced zero rows without any unit failing.
    pub empty_documents: Vec<PathBuf>,

    /// Documents that failed as a whole.
    pub document_failures: Vec<DocumentFailure>,

    /// Units that failed inside otherwise processed documents.
    pub unit_failures: Vec<DocumentUnitFailure>,

    /// Non-fatal issues, prefixed with the council name.
    pub warnings: Vec<String>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome of a processed document.
    pub fn add_document(&mut self, path: &Path, outcome: DocumentOutcome) {
        let council_name = council_name_from_path(path);
        self.documents_processed += 1;

        // Documents whose units all failed are reported as failures, not as empty
        if outcome.rows.is_empty() && outcome.unit_failures.is_empty() {
            tracing::warn!(path = %path.display(), "Could not find data in document");
            self.empty_documents.push(path.to_path_buf());
        }

        self.rows.extend(
            outcome
                .rows
                .into_iter()
                .map(|row| DatasetRow::new(row, council_name.as_str())),
        );
        self.unit_failures
            .extend(outcome.unit_failures.into_iter().map(|failure| DocumentUnitFailure {
                path: path.to_path_buf(),
                failure,
            }));
        self.warnings.extend(
            outcome
                .warnings
                .into_iter()
                .map(|warning| format!("{council_name}: {warning}")),
        );
    }

    /// Record a document that failed as a whole.
    pub fn add_failure(&mut self, path: &Path, error: ExtractorError) {
        tracing::warn!(path = %path.display(), error = %error, "Document failed, skipping");
        self.document_failures.push(DocumentFailure {
            path: path.to_path_buf(),
            error,
        });
    }

    /// Whether any document or unit failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.document_failures.is_empty() || !self.unit_failures.is_empty()
    }
}

/// List the count documents directly inside a directory, sorted by file name.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let is_document = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
        if is_document {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// Read and process one document from disk.
pub fn process_path(path: &Path, options: ExtractOptions) -> Result<DocumentOutcome> {
    let xml = fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    process_document(&xml, &name, options)
}

/// Process documents in order and collect them into a dataset.
///
/// A failing document is recorded and the next one is processed.
/// `on_document` is called after each document, e.g. to advance a
/// progress bar.
pub fn build_dataset(
    paths: &[PathBuf],
    options: ExtractOptions,
    mut on_document: impl FnMut(&Path),
) -> Dataset {
    let mut dataset = Dataset::new();

    for path in paths {
        match process_path(path, options) {
            Ok(outcome) => dataset.add_document(path, outcome),
            Err(error) => dataset.add_failure(path, error),
        }
        on_document(path);
    }

    tracing::info!(
        documents = dataset.documents_processed,
        rows = dataset.rows.len(),
        failed_documents = dataset.document_failures.len(),
        failed_units = dataset.unit_failures.len(),
        "Dataset complete"
    );

    dataset
}
