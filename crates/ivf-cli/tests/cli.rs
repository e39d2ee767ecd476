//! CLI command integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ivf_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ivf").unwrap();
    cmd.env_remove("IVF_ADDR").env_remove("IVF_CONFIG");
    cmd
}

#[test]
fn score_documented_example() {
    ivf_cmd()
        .args(["score", "--icsi", "--pgt"])
        .assert()
        .success()
        .stdout("19.8%\n");
}

#[test]
fn score_oldest_range_many_cycles_with_endometriosis() {
    // (50 - 20 - 5) * (1 - e^(-10/3)) = 24.108...
    ivf_cmd()
        .args([
            "score",
            "--age-range",
            "above-43",
            "--cycles",
            "10",
            "--condition",
            "Endometriosis",
        ])
        .assert()
        .success()
        .stdout("24.1%\n");
}

#[test]
fn score_json_has_breakdown() {
    let output = ivf_cmd()
        .args(["score", "--json", "--age-range", "30-34", "--condition", "PCOS"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["answers"]["ageRange"], "30-34");
    assert_eq!(json["breakdown"]["preDecay"], 55.0);
    assert_eq!(json["breakdown"]["endometriosisPenalty"], 0.0);
    assert_eq!(
        json["query"],
        "ageRange=30-34&icsiProcedure=no&pgtTesting=no&ivfCycles=1&medicalConditions=PCOS"
    );
}

#[test]
fn score_verbose_prints_terms_to_stderr() {
    ivf_cmd()
        .args(["score", "--verbose", "--cycles", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--- terms: base=50, age=+10"))
        .stderr(predicate::str::contains("--- decay: cycles=3"));
}

#[test]
fn score_rejects_unknown_age_range() {
    ivf_cmd()
        .args(["score", "--age-range", "45-50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown age range '45-50'"));
}

#[test]
fn score_rejects_cycles_outside_slider_range() {
    ivf_cmd()
        .args(["score", "--cycles", "11"])
        .assert()
        .failure();
    ivf_cmd()
        .args(["score", "--cycles", "0"])
        .assert()
        .failure();
}

#[test]
fn score_rejects_unknown_condition() {
    ivf_cmd()
        .args(["score", "--condition", "Asthma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown medical condition"));
}

#[test]
fn encode_prints_query_string() {
    ivf_cmd()
        .args([
            "encode",
            "--age-range",
            "41-43",
            "--cycles",
            "2",
            "--pgt",
            "--condition",
            "Low Ovarian Reserve",
            "--condition",
            "Endometriosis",
        ])
        .assert()
        .success()
        .stdout(
            "ageRange=41-43&icsiProcedure=no&pgtTesting=yes&ivfCycles=2\
             &medicalConditions=Low+Ovarian+Reserve%2CEndometriosis\n",
        );
}

#[test]
fn decode_full_url() {
    ivf_cmd()
        .args([
            "decode",
            "http://localhost:3000/calculator/result?ageRange=under-30&icsiProcedure=yes&pgtTesting=yes&ivfCycles=1&medicalConditions=",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("success rate:       20%"))
        .stdout(predicate::str::contains("cycles:             With 1 IVF Cycle\n"))
        .stdout(predicate::str::contains("age range:          Under 30"))
        .stdout(predicate::str::contains("medical conditions: None"));
}

#[test]
fn decode_bare_query_with_conditions() {
    ivf_cmd()
        .args([
            "decode",
            "ageRange=35-37&ivfCycles=4&medicalConditions=PCOS,Endometriosis",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("cycles:             With 4 IVF Cycles"))
        .stdout(predicate::str::contains("age range:          35 - 37"))
        .stdout(predicate::str::contains("icsi procedure:     No"))
        .stdout(predicate::str::contains(
            "medical conditions: PCOS, Endometriosis",
        ));
}

#[test]
fn decode_bare_query_keeps_question_marks_in_values() {
    ivf_cmd()
        .args(["decode", "ageRange=a?b&ivfCycles=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("age range:          a?b\n"))
        .stdout(predicate::str::contains("With 2 IVF Cycles"));
}

#[test]
fn decode_url_without_query_uses_defaults() {
    ivf_cmd()
        .args(["decode", "http://localhost:3000/calculator/result"])
        .assert()
        .success()
        .stdout(predicate::str::contains("With 1 IVF Cycle\n"))
        .stdout(predicate::str::contains("medical conditions: None"));
}

#[test]
fn decode_malformed_query_still_succeeds() {
    ivf_cmd()
        .args(["decode", "ivfCycles=lots&ageRange=ancient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("age range:          ancient"))
        .stdout(predicate::str::contains("With 1 IVF Cycle\n"));
}

#[test]
fn decode_json() {
    let output = ivf_cmd()
        .args(["decode", "--json", "ageRange=above-43&pgtTesting=yes"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ageRange"], "Above 43");
    assert_eq!(json["pgtTesting"], "Yes");
    assert_eq!(json["medicalConditions"], "None");
    assert_eq!(json["cycles"], 1);
}

#[test]
fn serve_fails_on_missing_config() {
    let dir = TempDir::new().unwrap();
    ivf_cmd()
        .args(["serve", "--config"])
        .arg(dir.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn serve_fails_on_bad_address() {
    ivf_cmd()
        .args(["serve", "--addr", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid listen address"));
}
