//! CLI tests against a mock PocketBase server.
//!
//! The binary runs as a child process; the mock server runs on the test's
//! multi-threaded runtime.

use std::process::{Command, Output};

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the CLI binary against `server` with test credentials.
async fn run_cli(server: &MockServer, args: &[&str]) -> Output {
    let url = server.uri();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_pb"))
            .args(&args)
            .env("POCKETBASE_URL", url)
            .env("POCKETBASE_IDENTITY", "ada@example.com")
            .env("POCKETBASE_PASSWORD", "secret123")
            .env_remove("POCKETBASE_AUTH_COLLECTION")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute CLI")
    })
    .await
    .expect("CLI task panicked")
}

async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "cli-token",
            "record": {
                "id": "user1",
                "created": "2024-01-01 09:00:00.000Z",
                "updated": "2024-01-01 09:00:00.000Z",
                "email": "ada@example.com",
                "verified": true
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_prints_account() {
    let server = MockServer::start().await;
    mount_auth(&server).await;

    let output = run_cli(&server, &["login"]).await;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("user1"));
    assert!(stdout.contains("ada@example.com"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_prints_one_json_line_per_record() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/collections/todoItems/records"))
        .and(header("authorization", "Bearer cli-token"))
        .and(query_param("filter", "(isCompleted=false)"))
        .and(query_param("perPage", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "perPage": 2,
            "totalItems": 2,
            "totalPages": 1,
            "items": [
                {
                    "id": "t1",
                    "created": "2024-01-01 10:00:00.000Z",
                    "updated": "2024-01-01 10:00:00.000Z",
                    "collectionId": "pbc_todo",
                    "collectionName": "todoItems",
                    "description": "water plants"
                },
                {
                    "id": "t2",
                    "created": "2024-01-01 10:00:00.000Z",
                    "updated": "2024-01-01 10:00:00.000Z",
                    "collectionId": "pbc_todo",
                    "collectionName": "todoItems",
                    "description": "buy milk"
                }
            ]
        })))
        .mount(&server)
        .await;

    let output = run_cli(
        &server,
        &["list", "todoItems", "--filter", "isCompleted=false", "--per-page", "2"],
    )
    .await;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "t1");
    assert_eq!(records[1]["description"], "buy milk");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_delete_exits_with_error() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/collections/todoItems/records/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let output = run_cli(&server, &["delete", "todoItems", "missing"]).await;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to delete record missing"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_credentials_exit_with_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-password"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{}"))
        .mount(&server)
        .await;

    let output = run_cli(&server, &["get", "todoItems", "t1"]).await;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to fetch record t1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verbose_run_logs_dispatch_and_failure() {
    let server = MockServer::start().await;
    mount_auth(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/collections/todoItems/records/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let output = run_cli(&server, &["-vv", "delete", "todoItems", "missing"]).await;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dispatching command"));
    assert!(stderr.contains("command failed"));
}
