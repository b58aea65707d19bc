//! Error types for the extractor.
//!
//! `ExtractorError` covers both document-level failures (parsing, missing
//! namespace) and unit-level failures (structure, duplicate ids, vote sums).
//! The document driver collects unit-level errors as values so one bad
//! reporting unit never takes its siblings down.

use std::fmt;

use thiserror::Error;

/// Scope in which an id was seen twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKey {
    /// Party id repeated within a reporting unit.
    Party { party_id: u32 },

    /// Candidate id repeated within a party.
    Candidate { party_id: u32, candidate_id: u32 },
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Party { party_id } => write!(f, "party {party_id}"),
            Self::Candidate {
                party_id,
                candidate_id,
            } => write!(f, "candidate {candidate_id} of party {party_id}"),
        }
    }
}

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Document declares no default namespace.
    #[error("No default namespace declared in {document}")]
    MissingNamespace { document: String },

    /// Reporting unit does not have the expected shape.
    #[error("Malformed reporting unit{}: {message}", .unit.as_ref().map(|u| format!(" {u}")).unwrap_or_default())]
    Structural {
        unit: Option<String>,
        message: String,
    },

    /// Party or candidate id seen twice within its scope.
    #[error("Duplicate {0}")]
    DuplicateKey(DuplicateKey),

    /// Party total disagrees with the sum of its candidates.
    #[error("Vote mismatch for party {party_id}: party total {party_votes}, candidates sum to {candidate_votes}")]
    VoteMismatch {
        party_id: u32,
        party_votes: u64,
        candidate_votes: u128,
    },

    /// Id attribute or vote count that is not a non-negative integer.
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Directory traversal error.
    #[error("Failed to list documents: {0}")]
    Walk(#[from] walkdir::Error),
}

impl ExtractorError {
    /// Shorthand for a structural error without a known unit id.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            unit: None,
            message: message.into(),
        }
    }

    /// Attach the reporting unit id to a structural error that lacks one.
    #[must_use]
    pub fn in_unit(self, unit_id: Option<&str>) -> Self {
        match self {
            Self::Structural {
                unit: None,
                message,
            } => Self::Structural {
                unit: unit_id.map(String::from),
                message,
            },
            other => other,
        }
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
