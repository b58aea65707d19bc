//! End-to-end integration tests for the extractor pipeline.
//!
//! Tests the complete pipeline from EML parsing to CSV generation using a
//! fixture count document for the fictional council of Testdorp.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use roxmltree::Document;

use stemtelling_extractor::config::{ExtractOptions, ExtractionMode};
use stemtelling_extractor::dataset::{build_dataset, discover_documents};
use stemtelling_extractor::document::{find_reporting_units, process_document};
use stemtelling_extractor::extract::extract_reporting_unit;
use stemtelling_extractor::output::save_csv;
use stemtelling_extractor::types::FlatRow;
use stemtelling_extractor::xml::default_namespace;

const FIXTURE: &str = "Telling_GR2022_Testdorp.eml.xml";

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn run_pipeline(mode: ExtractionMode) -> Vec<FlatRow> {
    let outcome = process_document(&load_fixture(FIXTURE), FIXTURE, ExtractOptions::new(mode))
        .expect("Failed to process fixture");
    assert!(outcome.unit_failures.is_empty(), "{:?}", outcome.unit_failures);
    outcome.rows
}

#[test]
fn test_pipeline_row_count() {
    assert_eq!(run_pipeline(ExtractionMode::AllCandidates).len(), 10);
    assert_eq!(run_pipeline(ExtractionMode::FirstCandidateOnly).len(), 4);
}

#[test]
fn test_pipeline_first_row() {
    let rows = run_pipeline(ExtractionMode::AllCandidates);

    assert_eq!(
        rows[0],
        FlatRow {
            unit_id: "0999::SB1".to_string(),
            unit_name: "Stembureau Gemeentehuis (postcode: 1234 AB)".to_string(),
            party_id: 1,
            party_name: "Lokaal Belang".to_string(),
            candidate_id: 1,
            candidate_votes: 90,
            party_total_votes: 150,
        }
    );
}

#[test]
fn test_candidate_votes_sum_to_party_total() {
    let rows = run_pipeline(ExtractionMode::AllCandidates);

    let mut sums: BTreeMap<(String, u32), (u64, u64)> = BTreeMap::new();
    for row in &rows {
        let entry = sums
            .entry((row.unit_id.clone(), row.party_id))
            .or_insert((0, row.party_total_votes));
        entry.0 += row.candidate_votes;
    }

    assert_eq!(sums.len(), 4);
    for ((unit, party), (candidates, total)) in sums {
        assert_eq!(candidates, total, "unit {unit} party {party}");
    }
}

#[test]
fn test_rows_follow_document_order() {
    let rows = run_pipeline(ExtractionMode::AllCandidates);

    let keys: Vec<(&str, u32, u32)> = rows
        .iter()
        .map(|r| (r.unit_id.as_str(), r.party_id, r.candidate_id))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("0999::SB1", 1, 1),
            ("0999::SB1", 1, 2),
            ("0999::SB1", 1, 3),
            ("0999::SB1", 2, 1),
            ("0999::SB1", 2, 2),
            ("0999::SB2", 1, 1),
            ("0999::SB2", 1, 2),
            ("0999::SB2", 1, 3),
            ("0999::SB2", 2, 1),
            ("0999::SB2", 2, 2),
        ]
    );
}

#[test]
fn test_first_candidate_mode_is_subset_of_all_candidates() {
    let all = run_pipeline(ExtractionMode::AllCandidates);
    let lead = run_pipeline(ExtractionMode::FirstCandidateOnly);

    let mut seen = std::collections::BTreeSet::new();
    for row in &lead {
        assert!(
            seen.insert((row.unit_id.clone(), row.party_id)),
            "more than one candidate for unit {} party {}",
            row.unit_id,
            row.party_id
        );

        let first_in_all = all
            .iter()
            .find(|r| r.unit_id == row.unit_id && r.party_id == row.party_id)
            .expect("party present in all-candidates output");
        assert_eq!(row, first_in_all);
    }

    // Lead candidate is the first listed, not the one with most votes
    let sb2_party1 = lead
        .iter()
        .find(|r| r.unit_id == "0999::SB2" && r.party_id == 1)
        .unwrap();
    assert_eq!(sb2_party1.candidate_id, 1);
    assert_eq!(sb2_party1.candidate_votes, 30);
}

#[test]
fn test_extraction_is_idempotent() {
    let xml = load_fixture(FIXTURE);
    let doc = Document::parse(&xml).unwrap();
    let ns = default_namespace(&doc, FIXTURE).unwrap();

    for unit in find_reporting_units(&doc, &ns) {
        let first = extract_reporting_unit(unit, &ns, ExtractionMode::AllCandidates).unwrap();
        let second = extract_reporting_unit(unit, &ns, ExtractionMode::AllCandidates).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_total_votes_block_ignored() {
    let xml = load_fixture(FIXTURE);
    let doc = Document::parse(&xml).unwrap();
    let ns = default_namespace(&doc, FIXTURE).unwrap();

    assert_eq!(find_reporting_units(&doc, &ns).len(), 2);
}

#[test]
fn test_dataset_over_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture_path(FIXTURE), dir.path().join(FIXTURE)).unwrap();
    fs::write(
        dir.path().join("Telling_GR2022_Kapot.eml.xml"),
        "<EML><Count/></EML>",
    )
    .unwrap();
    fs::write(
        dir.path().join("Telling_GR2022_Leeg.eml.xml"),
        r#"<EML xmlns="urn:oasis:names:tc:evs:schema:eml"><Count/></EML>"#,
    )
    .unwrap();
    fs::write(dir.path().join("notities.txt"), "geen xml").unwrap();

    let paths = discover_documents(dir.path()).unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "Telling_GR2022_Kapot.eml.xml",
            "Telling_GR2022_Leeg.eml.xml",
            "Telling_GR2022_Testdorp.eml.xml",
        ]
    );

    let mut visited = 0;
    let dataset = build_dataset(&paths, ExtractOptions::default(), |_| visited += 1);

    assert_eq!(visited, 3);
    assert_eq!(dataset.documents_processed, 2);
    assert_eq!(dataset.rows.len(), 4);
    assert!(dataset.rows.iter().all(|r| r.council_name == "Testdorp"));
    assert_eq!(dataset.empty_documents.len(), 1);
    assert!(dataset.empty_documents[0].ends_with("Telling_GR2022_Leeg.eml.xml"));
    assert_eq!(dataset.document_failures.len(), 1);
    assert!(dataset.document_failures[0]
        .path
        .ends_with("Telling_GR2022_Kapot.eml.xml"));

    let output = dir.path().join("processed_data.csv");
    save_csv(&dataset.rows, &output).unwrap();
    let csv = fs::read_to_string(&output).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ReportingUnitName,PartyNumber,ReportingUnitIdentifier,PartyName,CandidateID,Votes,TotalVotesForParty,CouncilName")
    );
    assert_eq!(
        lines.next(),
        Some("Stembureau Gemeentehuis (postcode: 1234 AB),1,0999::SB1,Lokaal Belang,1,90,150,Testdorp")
    );
    assert_eq!(lines.count(), 3);
}
