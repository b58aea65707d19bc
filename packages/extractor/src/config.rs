//! Configuration constants and options for the extractor.

use std::path::Path;

/// Tag of the reporting unit identity element.
pub const TAG_REPORTING_UNIT_IDENTIFIER: &str = "ReportingUnitIdentifier";

/// Tag of a party or candidate tally.
pub const TAG_SELECTION: &str = "Selection";

/// Tag that marks a party-defining Selection (found one level below its children).
pub const TAG_REGISTERED_NAME: &str = "RegisteredName";

/// Tag carrying the party id.
pub const TAG_AFFILIATION_IDENTIFIER: &str = "AffiliationIdentifier";

/// Tag that marks a candidate Selection.
pub const TAG_CANDIDATE: &str = "Candidate";

/// Tag carrying a vote count.
pub const TAG_VALID_VOTES: &str = "ValidVotes";

/// Tag of a reporting unit subtree.
pub const TAG_REPORTING_UNIT_VOTES: &str = "ReportingUnitVotes";

/// Attribute holding identifiers.
pub const ATTR_ID: &str = "Id";

/// Path from the document root element to each reporting unit subtree.
pub const REPORTING_UNIT_PATH: [&str; 5] = [
    "Count",
    "Election",
    "Contests",
    "Contest",
    TAG_REPORTING_UNIT_VOTES,
];

/// File extension of EML count documents.
pub const DOCUMENT_EXTENSION: &str = "xml";

/// Default output file name for the flattened dataset.
pub const DEFAULT_OUTPUT_FILE: &str = "processed_data.csv";

/// Which candidate Selections the extractor keeps per party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Every candidate of every party.
    AllCandidates,

    /// Only the first candidate listed after each party (the lead candidate).
    #[default]
    FirstCandidateOnly,
}

impl ExtractionMode {
    /// Build the mode from the `--all-candidates` flag.
    #[must_use]
    pub fn from_all_candidates(all_candidates: bool) -> Self {
        if all_candidates {
            Self::AllCandidates
        } else {
            Self::FirstCandidateOnly
        }
    }

    /// Whether party totals can be checked against candidate sums.
    ///
    /// Only true when every candidate was extracted; with a single
    /// candidate per party the sums are expected to differ.
    #[must_use]
    pub fn requires_validation(&self) -> bool {
        matches!(self, Self::AllCandidates)
    }
}

/// How a vote-sum mismatch affects the reporting unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// Keep the unit's rows and record a warning.
    #[default]
    Warn,

    /// Drop the unit and record it as failed.
    Reject,
}

/// Options for processing a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub mode: ExtractionMode,
    pub mismatch_policy: MismatchPolicy,
}

impl ExtractOptions {
    /// Create options for the given mode with the default mismatch policy.
    #[must_use]
    pub fn new(mode: ExtractionMode) -> Self {
        Self {
            mode,
            mismatch_policy: MismatchPolicy::default(),
        }
    }

    /// Set the mismatch policy.
    #[must_use]
    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }
}

/// Derive the council name from a document path.
///
/// Count files are named like `Telling_GR2022_Amsterdam.eml.xml`; the council
/// is the part after the last underscore, up to the first dot.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use stemtelling_extractor::config::council_name_from_path;
///
/// let path = Path::new("data/Telling_GR2022_Amsterdam.eml.xml");
/// assert_eq!(council_name_from_path(path), "Amsterdam");
/// ```
pub fn council_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    let last_segment = file_name.rsplit('_').next().unwrap_or_default();
    last_segment
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}
