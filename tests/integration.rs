mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pydeps() -> Command {
    Command::cargo_bin("pydeps").expect("binary builds")
}

async fn mock_package(server: &MockServer, name: &str, version: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{name}/json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "info": {
                "version": version,
                "summary": format!("{name} summary"),
                "home_page": null,
                "project_url": null,
                "package_url": null,
            }
        })))
        .mount(server)
        .await;
}

/// Mount the registry state matching the common fixtures
async fn mock_registry(server: &MockServer) {
    mock_package(server, "requests", "2.32.3").await;
    mock_package(server, "numpy", "1.24.0").await;
    mock_package(server, "pytest", "7.4.0").await;
    mock_package(server, "black", "23.7.0").await;
    mock_package(server, "sphinx", "8.0.0").await;
}

/// Test that --help flag works
#[test]
fn test_help_flag() {
    pydeps()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Track Python project dependencies",
        ))
        .stdout(predicate::str::contains("--bump"))
        .stdout(predicate::str::contains("--upgrade"))
        .stdout(predicate::str::contains("--watch"))
        .stdout(predicate::str::contains("--interval"));
}

/// Test that --version flag works
#[test]
fn test_version_flag() {
    pydeps()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pydeps"));
}

/// Test running on an empty project (no manifest)
#[test]
fn test_empty_project() {
    let project = common::TempProject::new();

    pydeps()
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependencies found"));
}

/// Test running on non-existent directory
#[test]
fn test_nonexistent_directory() {
    pydeps().arg("/nonexistent/path/to/project").assert().failure();
}

/// Test a full pass against a mocked registry
#[tokio::test(flavor = "multi_thread")]
async fn test_full_pass_renders_table() {
    let server = MockServer::start().await;
    mock_registry(&server).await;
    let project = common::create_project_with_lock();

    pydeps()
        .arg(project.path())
        .arg("--index-url")
        .arg(server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("requests"))
        .stdout(predicate::str::contains("2.31.0"))
        .stdout(predicate::str::contains("2.32.3"))
        .stdout(predicate::str::contains("outdated"))
        .stdout(predicate::str::contains("up-to-date"))
        .stdout(predicate::str::contains("dev"));
}

/// Test that per-package registry failures degrade to unknown status
#[tokio::test(flavor = "multi_thread")]
async fn test_registry_failure_degrades_to_unknown() {
    // No mocks mounted: every lookup 404s.
    let server = MockServer::start().await;
    let project = common::create_project_with_lock();

    pydeps()
        .arg(project.path())
        .arg("--index-url")
        .arg(server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown"))
        .stdout(predicate::str::contains("requests"));
}

/// Test that --upgrade prints one grouped command per dependency group
#[tokio::test(flavor = "multi_thread")]
async fn test_upgrade_commands_are_grouped() {
    let server = MockServer::start().await;
    mock_registry(&server).await;
    let project = common::create_project_with_lock();

    pydeps()
        .arg(project.path())
        .arg("--upgrade")
        .arg("--index-url")
        .arg(server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("To upgrade, run:"))
        .stdout(predicate::str::contains("uv add --upgrade requests"))
        .stdout(predicate::str::contains("uv add --upgrade --group dev pytest"))
        .stdout(predicate::str::contains("uv add --upgrade --group docs sphinx"));
}

/// Test that --bump rewrites lagging constraints to the locked versions
#[tokio::test(flavor = "multi_thread")]
async fn test_bump_rewrites_constraints() {
    let server = MockServer::start().await;
    let project = common::create_project_with_lock();

    pydeps()
        .arg(project.path())
        .arg("--bump")
        .arg("--index-url")
        .arg(server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 3 constraint(s)"));

    let manifest = fs::read_to_string(project.file_path("pyproject.toml")).expect("read manifest");
    assert!(manifest.contains("\"requests>=2.31.0\""));
    assert!(manifest.contains("\"black>=23.7.0\""));
    assert!(manifest.contains("\"sphinx~=7.2.6\""));
    // Already in sync with the lock, left alone.
    assert!(manifest.contains("\"numpy==1.24.0\""));
    assert!(manifest.contains("\"pytest>=7.0.0\""));
    // Everything outside the edited lines is untouched.
    assert!(manifest.contains("description = \"A test project\""));
    assert!(manifest.contains("[build-system]"));
}

/// Test that files are not modified without --bump
#[tokio::test(flavor = "multi_thread")]
async fn test_no_modification_without_bump() {
    let server = MockServer::start().await;
    mock_registry(&server).await;
    let project = common::create_project_with_lock();

    let original = fs::read_to_string(project.file_path("pyproject.toml")).expect("read manifest");

    pydeps()
        .arg(project.path())
        .arg("--index-url")
        .arg(server.uri())
        .assert()
        .success();

    let current = fs::read_to_string(project.file_path("pyproject.toml")).expect("read manifest");
    assert_eq!(original, current);
}

/// Test that current directory is used when no path is provided
#[test]
fn test_default_to_current_directory() {
    let project = common::TempProject::new();

    pydeps()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependencies found"));
}

/// Test a manifest without a lock: requested literals are the reference
#[tokio::test(flavor = "multi_thread")]
async fn test_manifest_without_lock() {
    let server = MockServer::start().await;
    mock_registry(&server).await;
    let project = common::TempProject::new();
    project.create_file("pyproject.toml", common::sample_pyproject());

    pydeps()
        .arg(project.path())
        .arg("--index-url")
        .arg(server.uri())
        .assert()
        .success()
        // numpy==1.24.0 matches the published 1.24.0 exactly.
        .stdout(predicate::str::contains("up-to-date"))
        .stdout(predicate::str::contains("outdated"));
}
