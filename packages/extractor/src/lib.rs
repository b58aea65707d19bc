//! Stemtelling Extractor - Flatten EML vote counts into a table.
//!
//! Dutch municipal election results are published per council as EML
//! count documents. Each document holds one `ReportingUnitVotes` subtree
//! per polling station, with party totals and per-candidate votes encoded
//! as sibling `Selection` elements. This crate turns those subtrees into
//! one row per (polling station, party, candidate).
//!
//! # Example
//!
//! ```
//! use stemtelling_extractor::config::{ExtractOptions, ExtractionMode};
//! use stemtelling_extractor::document::process_document;
//!
//! let xml = r#"<EML xmlns="urn:oasis:names:tc:evs:schema:eml"><Count><Election><Contests><Contest>
//!   <ReportingUnitVotes>
//!     <ReportingUnitIdentifier Id="0001">Stembureau A</ReportingUnitIdentifier>
//!     <Selection>
//!       <AffiliationIdentifier Id="1"><RegisteredName>Party X</RegisteredName></AffiliationIdentifier>
//!       <ValidVotes>100</ValidVotes>
//!     </Selection>
//!     <Selection><Candidate><CandidateIdentifier Id="11"/></Candidate><ValidVotes>60</ValidVotes></Selection>
//!     <Selection><Candidate><CandidateIdentifier Id="12"/></Candidate><ValidVotes>40</ValidVotes></Selection>
//!   </ReportingUnitVotes>
//! </Contest></Contests></Election></Count></EML>"#;
//!
//! let options = ExtractOptions::new(ExtractionMode::AllCandidates);
//! let outcome = process_document(xml, "example.xml", options).unwrap();
//! assert_eq!(outcome.rows.len(), 2);
//! assert_eq!(outcome.rows[0].candidate_votes, 60);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Tag names, extraction mode and options
//! - [`error`]: Error types and Result alias
//! - [`types`]: Nested records and flat rows
//! - [`xml`]: Namespace resolution and XML utilities
//! - [`extract`]: Selection classification and reporting unit extraction
//! - [`validate`]: Party total vs. candidate sum check
//! - [`flatten`]: Record to rows
//! - [`document`]: Per-document driver
//! - [`dataset`]: Multi-document aggregation
//! - [`output`]: CSV serialization
//! - [`inspect`]: Tag listing and tree rendering
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod dataset;
pub mod document;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod inspect;
pub mod output;
pub mod types;
pub mod validate;
pub mod xml;

// Re-export main functions
pub use dataset::build_dataset;
pub use document::process_document;

// Re-export commonly used items
pub use config::{ExtractOptions, ExtractionMode, MismatchPolicy};
pub use error::{ExtractorError, Result};
pub use types::{DatasetRow, FlatRow, ReportingUnitRecord};
