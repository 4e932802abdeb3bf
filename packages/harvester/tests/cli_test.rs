//! Tests for the `zenodo-harvester` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("zenodo")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

async fn listing_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("set", "user-lsst"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("list_records.xml")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("set", "user-partial"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("broken_record.xml")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("set", "user-broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    mock_server
}

fn harvester() -> Command {
    Command::cargo_bin("zenodo-harvester").expect("binary should be built")
}

#[test]
fn test_help() {
    harvester()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("harvest"));
}

#[test]
fn test_unknown_format_fails() {
    harvester()
        .args(["harvest", "lsst", "--format", "oai_dc"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported metadata format: 'oai_dc'"));
}

#[test]
fn test_blank_collection_fails() {
    harvester()
        .args(["harvest", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid collection identifier"));
}

#[tokio::test]
async fn test_harvest_prints_json() {
    let mock_server = listing_server().await;
    let endpoint = format!("{}/oai2d", mock_server.uri());

    let output = tokio::task::spawn_blocking(move || {
        harvester()
            .args(["harvest", "lsst", "--endpoint", endpoint.as_str(), "--output", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    })
    .await
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["doi"], "10.5281/zenodo.47983");
    assert_eq!(records[1]["title"], "The LSST Data Management Software Stack");
}

#[tokio::test]
async fn test_harvest_writes_output_file() {
    let mock_server = listing_server().await;
    let endpoint = format!("{}/oai2d", mock_server.uri());
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("out").join("lsst.yaml");
    let output_arg = output_path.clone();

    tokio::task::spawn_blocking(move || {
        harvester()
            .args(["harvest", "lsst", "--endpoint", endpoint.as_str()])
            .arg("--output-file")
            .arg(&output_arg)
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Saved to:"));
    })
    .await
    .unwrap();

    let yaml = fs::read_to_string(&output_path).unwrap();
    assert!(yaml.contains("10.5281/zenodo.48203"));
    assert!(yaml.contains("Galaxy Shear Estimation for LSST"));
}

#[tokio::test]
async fn test_harvest_server_error_fails() {
    let mock_server = listing_server().await;
    let endpoint = format!("{}/oai2d", mock_server.uri());

    tokio::task::spawn_blocking(move || {
        harvester()
            .args(["harvest", "broken", "--endpoint", endpoint.as_str()])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("503"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_harvest_skips_incomplete_records() {
    let mock_server = listing_server().await;
    let endpoint = format!("{}/oai2d", mock_server.uri());

    tokio::task::spawn_blocking(move || {
        harvester()
            .args(["harvest", "partial", "--endpoint", endpoint.as_str(), "--output", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"))
            .stderr(predicate::str::contains("Skipped: 1"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_harvest_strict_fails_on_incomplete_record() {
    let mock_server = listing_server().await;
    let endpoint = format!("{}/oai2d", mock_server.uri());

    tokio::task::spawn_blocking(move || {
        harvester()
            .args(["harvest", "partial", "--endpoint", endpoint.as_str(), "--strict"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Missing required XML element"));
    })
    .await
    .unwrap();
}
