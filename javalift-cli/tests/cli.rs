use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn javalift() -> Command {
    let mut cmd = Command::cargo_bin("javalift").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_validate_valid_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Main.java");
    fs::write(&path, "class Main { }").unwrap();

    javalift()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"message\": \"Valid code\""))
        .stdout(predicate::str::contains("\"fileName\": \"Main.java\""));
}

#[test]
fn test_validate_wrong_extension_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Main.kt");
    fs::write(&path, "class Main { }").unwrap();

    javalift()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid file type"));
}

#[test]
fn test_enhance_writes_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Files.java");
    let output = dir.path().join("Files.out.java");
    fs::write(&input, "class Files { void f(File d) { d.list(); } }").unwrap();

    javalift()
        .args([
            "enhance",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deprecatedApiCount\": 1"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "class Files { void f(File d) { d.listFiles(); } }"
    );
}

#[test]
fn test_enhance_unparsable_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Broken.java");
    fs::write(&path, "class Broken {").unwrap();

    javalift()
        .args(["enhance", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error during enhancement: "))
        .stdout(predicate::str::contains("Problem stacktrace").not());
}

#[test]
fn test_metrics_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Switch.java");
    fs::write(
        &path,
        "class Switch {\n    void f(int k) {\n        switch (k) { case 1: a(); default: b(); }\n    }\n}\n",
    )
    .unwrap();

    let output = javalift()
        .args(["metrics", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let metrics: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(metrics["totalLinesOfCode"], 5);
    assert_eq!(metrics["cyclomaticComplexity"], 3);
    assert_eq!(metrics["modernizationOpportunities"], 1);
}

#[test]
fn test_config_file_disables_pass() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("javalift.toml");
    let input = dir.path().join("Files.java");
    let output = dir.path().join("out.java");
    fs::write(&config, "[engine]\ndeprecated_apis = false\n").unwrap();
    fs::write(&input, "class Files { void f(File d) { d.list(); } }").unwrap();

    javalift()
        .args([
            "--config",
            config.to_str().unwrap(),
            "enhance",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "class Files { void f(File d) { d.list(); } }"
    );
}

#[test]
fn test_missing_file_reports_error() {
    javalift()
        .args(["metrics", "does/not/exist.java"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
