//! Hierarchical extraction of reporting unit subtrees.
//!
//! Classification of `Selection` nodes is kept apart from reading their
//! fields: [`classify_selection`] decides the shape, the extractor then
//! reads a known shape.

mod classify;
mod extractor;

pub use classify::{classify_selection, SelectionKind};
pub use extractor::extract_reporting_unit;
pub(crate) use extractor::{extract_labelled, reporting_unit_id};
