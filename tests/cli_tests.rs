//! Integration tests for CLI functionality

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const ORGANIZATIONS: &str = "AWSOrganizationsV20161128";

/// Get path to compiled binary
fn org_inventory_bin() -> &'static Path {
    assert_cmd::cargo::cargo_bin!("org-inventory")
}

/// Matches a JSON request body by its `NextToken` (None = first page)
struct NextToken(Option<&'static str>);

impl Match for NextToken {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return false;
        };
        body.get("NextToken").and_then(Value::as_str) == self.0
    }
}

fn target(operation: &str) -> String {
    format!("{}.{}", ORGANIZATIONS, operation)
}

fn json_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn account(id: &str, name: &str) -> Value {
    json!({
        "Id": id,
        "Arn": format!("arn:aws:organizations::999999999999:account/o-test/{}", id),
        "Name": name,
        "Email": format!("{}@example.com", name.to_lowercase()),
        "Status": "ACTIVE",
        "JoinedMethod": "CREATED",
        "JoinedTimestamp": 1700000000.0
    })
}

async fn mount_roots(server: &MockServer) {
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("ListRoots").as_str()))
        .respond_with(json_response(json!({
            "Roots": [{ "Id": "r-1", "Name": "Root" }]
        })))
        .mount(server)
        .await;
}

async fn mount_children(server: &MockServer, parent: &str, accounts: Value, units: Value) {
    Mock::given(method("POST"))
        .and(header(
            "x-amz-target",
            target("ListAccountsForParent").as_str(),
        ))
        .and(body_partial_json(json!({ "ParentId": parent })))
        .respond_with(json_response(json!({ "Accounts": accounts })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(header(
            "x-amz-target",
            target("ListOrganizationalUnitsForParent").as_str(),
        ))
        .and(body_partial_json(json!({ "ParentId": parent })))
        .respond_with(json_response(json!({ "OrganizationalUnits": units })))
        .mount(server)
        .await;
}

/// Run the binary against the mock server without blocking the runtime
async fn run_against(server: &MockServer, output_dir: PathBuf, args: &[&str]) -> Output {
    let endpoint = server.uri();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        Command::new(org_inventory_bin())
            .env_remove("AWS_PROFILE")
            .env_remove("AWS_SESSION_TOKEN")
            .env("AWS_ACCESS_KEY_ID", "AKIDTEST")
            .env("AWS_SECRET_ACCESS_KEY", "secret")
            .env(
                "AWS_SHARED_CREDENTIALS_FILE",
                output_dir.join("no-credentials"),
            )
            .arg("--batch")
            .args(["--endpoint-url", &endpoint])
            .arg("-d")
            .arg(&output_dir)
            .args(&args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default()
}

/// Test that help flag works
#[test]
fn test_help_flag() {
    Command::new(org_inventory_bin())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inventory AWS Organizations accounts and IAM Identity Center assignments",
        ))
        .stdout(predicate::str::contains("identity-center"));
}

/// Test that version flag works
#[test]
fn test_version_flag() {
    Command::new(org_inventory_bin())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("org-inventory"));
}

/// Test invalid format argument
#[test]
fn test_invalid_format() {
    Command::new(org_inventory_bin())
        .args(["accounts", "--format", "invalid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

/// Test that a subcommand is required
#[test]
fn test_missing_subcommand() {
    Command::new(org_inventory_bin())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/// Accounts export writes one CSV with OU paths
#[tokio::test(flavor = "multi_thread")]
async fn test_accounts_csv_export() {
    let server = MockServer::start().await;
    mount_roots(&server).await;
    mount_children(
        &server,
        "r-1",
        json!([account("111111111111", "A1")]),
        json!([{ "Id": "ou-eng", "Name": "Engineering" }]),
    )
    .await;
    mount_children(
        &server,
        "ou-eng",
        json!([account("222222222222", "A2")]),
        json!([]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().to_path_buf();
    let output = run_against(&server, out, &["accounts"]).await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let files = files_in(dir.path());
    assert_eq!(files.len(), 1);
    let content = std::fs::read_to_string(&files[0]).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "Name,Id,OuPath,OuId,Email,Status,JoinedMethod,JoinedTimestamp"
    );
    let first = "A1,111111111111,/,r-1,a1@example.com,ACTIVE,CREATED,";
    assert!(lines[1].starts_with(first));
    let second = "A2,222222222222,/Engineering,ou-eng,";
    assert!(lines[2].starts_with(second));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote 2 accounts"));
}

/// JSON to stdout leaves the output directory untouched
#[tokio::test(flavor = "multi_thread")]
async fn test_accounts_json_stdout() {
    let server = MockServer::start().await;
    mount_roots(&server).await;
    mount_children(
        &server,
        "r-1",
        json!([account("111111111111", "A1")]),
        json!([]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports");
    let args = ["accounts", "-f", "json", "--stdout"];
    let output = run_against(&server, out.clone(), &args).await;

    assert!(output.status.success());
    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["Name"], "A1");
    assert_eq!(rows[0]["OuPath"], "/");
    assert!(!out.exists());
}

/// A throttled page aborts the export and nothing is written
#[tokio::test(flavor = "multi_thread")]
async fn test_throttled_page_writes_nothing() {
    let server = MockServer::start().await;
    mount_roots(&server).await;

    Mock::given(method("POST"))
        .and(header(
            "x-amz-target",
            target("ListAccountsForParent").as_str(),
        ))
        .and(NextToken(None))
        .respond_with(json_response(json!({
            "Accounts": [account("111111111111", "A1")],
            "NextToken": "page-2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header(
            "x-amz-target",
            target("ListAccountsForParent").as_str(),
        ))
        .and(NextToken(Some("page-2")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "TooManyRequestsException",
            "message": "Rate exceeded"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports");
    let output = run_against(&server, out.clone(), &["accounts"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("TooManyRequestsException"),
        "stderr: {}",
        stderr
    );
    assert!(files_in(&out).is_empty());
}
