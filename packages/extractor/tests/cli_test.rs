//! Tests for the `stemtelling` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = "Telling_GR2022_Testdorp.eml.xml";

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(FIXTURE)
}

fn stemtelling() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("stemtelling"))
}

#[test]
fn extract_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture_path(), dir.path().join(FIXTURE)).unwrap();
    let output = dir.path().join("uitslag.csv");

    stemtelling()
        .arg("extract")
        .arg(dir.path())
        .arg("--all-candidates")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 10"))
        .stdout(predicate::str::contains("Saved to:"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with(
        "ReportingUnitName,PartyNumber,ReportingUnitIdentifier,PartyName,CandidateID,Votes,TotalVotesForParty,CouncilName\n"
    ));
    assert_eq!(csv.lines().count(), 11);
}

#[test]
fn extract_lead_candidates_by_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture_path(), dir.path().join(FIXTURE)).unwrap();
    let output = dir.path().join("uitslag.csv");

    stemtelling()
        .arg("extract")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 4"));
}

#[test]
fn extract_reports_failed_documents() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Telling_GR2022_Kapot.eml.xml"), "<EML/>").unwrap();
    let output = dir.path().join("uitslag.csv");

    stemtelling()
        .arg("extract")
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed documents: "))
        .stdout(predicate::str::contains("Telling_GR2022_Kapot.eml.xml"));

    assert!(output.exists());
}

const MISMATCH_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<EML xmlns="urn:oasis:names:tc:evs:schema:eml">
  <Count><Election><Contests><Contest>
    <ReportingUnitVotes>
      <ReportingUnitIdentifier Id="0001::SB1">Stembureau Scheef</ReportingUnitIdentifier>
      <Selection>
        <AffiliationIdentifier Id="1"><RegisteredName>Partij</RegisteredName></AffiliationIdentifier>
        <ValidVotes>10</ValidVotes>
      </Selection>
      <Selection><Candidate><CandidateIdentifier Id="1"/></Candidate><ValidVotes>6</ValidVotes></Selection>
    </ReportingUnitVotes>
  </Contest></Contests></Election></Count>
</EML>"#;

#[test]
fn extract_strict_drops_mismatching_units() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Telling_GR2022_Scheef.eml.xml"), MISMATCH_DOCUMENT).unwrap();
    let output = dir.path().join("uitslag.csv");

    stemtelling()
        .arg("extract")
        .arg(dir.path())
        .arg("--all-candidates")
        .arg("--strict")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 0"))
        .stdout(predicate::str::contains("Failed reporting units: 1"))
        .stdout(predicate::str::contains("(0001::SB1): Vote mismatch for party 1"))
        .stdout(predicate::str::contains("Documents without data").not());

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn extract_warns_on_mismatch_by_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Telling_GR2022_Scheef.eml.xml"), MISMATCH_DOCUMENT).unwrap();
    let output = dir.path().join("uitslag.csv");

    stemtelling()
        .arg("extract")
        .arg(dir.path())
        .arg("--all-candidates")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 1"))
        .stdout(predicate::str::contains("Warnings: 1"))
        .stdout(predicate::str::contains("Scheef: Reporting unit 0001::SB1: Vote mismatch"));

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn extract_missing_input_dir_fails() {
    let dir = tempfile::tempdir().unwrap();

    stemtelling()
        .arg("extract")
        .arg(dir.path().join("bestaat-niet"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input directory does not exist"));
}

#[test]
fn tags_lists_qualified_tags() {
    stemtelling()
        .arg("tags")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "{urn:oasis:names:tc:evs:schema:eml}ReportingUnitVotes",
        ))
        .stdout(predicate::str::contains(
            "{urn:oasis:names:tc:evs:schema:eml}Selection",
        ));
}

#[test]
fn tree_prints_indented_elements() {
    stemtelling()
        .arg("tree")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "{urn:oasis:names:tc:evs:schema:eml}EML\n    ",
        ));
}
