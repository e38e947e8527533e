//! MCP server integration tests.
//!
//! Tools are exercised through the server's `test_*` helpers against a
//! temporary memory bank.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use memory_bank::mcp::*;
use memory_bank::models::*;
use memory_bank::store::DocumentStore;
use tempfile::TempDir;

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 6)
        .unwrap()
        .and_hms_opt(7, 8, 9)
        .unwrap()
}

/// Helper to create a test MCP server over a fresh memory bank.
fn setup() -> (McpServer, DocumentStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = DocumentStore::new(dir.path().join("memory-bank")).with_clock(fixed_time);
    let server = McpServer::new(store.clone());
    (server, store, dir)
}

fn target(file_name: Option<&str>, entry: Option<&str>, header: Option<&str>) -> AppendTargetInput {
    AppendTargetInput {
        file_name: file_name.map(String::from),
        entry: entry.map(String::from),
        section_header: header.map(String::from),
    }
}

mod list_or_read {
    use super::*;

    #[tokio::test]
    async fn lists_bootstrap_documents_when_no_names_given() {
        let (server, _store, _dir) = setup();

        let response = server.test_list_or_read(None).expect("Tool failed");

        let names = response.files.names().expect("Expected list mode");
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"activeContext.md".to_string()));
    }

    #[tokio::test]
    async fn empty_names_behave_like_list() {
        let (server, _store, _dir) = setup();

        let listed = server.test_list_or_read(None).expect("Tool failed");
        let empty = server.test_list_or_read(Some(vec![])).expect("Tool failed");

        assert_eq!(listed, empty);
    }

    #[tokio::test]
    async fn reads_requested_documents_with_null_for_missing() {
        let (server, _store, _dir) = setup();

        let response = server
            .test_list_or_read(Some(vec![
                "productContext.md".to_string(),
                "missing.md".to_string(),
            ]))
            .expect("Tool failed");

        let contents = response.files.contents().expect("Expected read mode");
        assert!(contents["productContext.md"]
            .as_deref()
            .is_some_and(|body| body.starts_with("# Product Context")));
        assert_eq!(contents["missing.md"], None);
    }

    #[tokio::test]
    async fn serializes_missing_documents_as_null() {
        let (server, _store, _dir) = setup();

        let response = server
            .test_list_or_read(Some(vec!["missing.md".to_string()]))
            .expect("Tool failed");

        let json = serde_json::to_value(&response).expect("Serialize failed");
        assert_eq!(json, serde_json::json!({ "files": { "missing.md": null } }));
    }

    #[tokio::test]
    async fn returns_error_for_invalid_names() {
        let (server, store, _dir) = setup();

        let result = server.test_list_or_read(Some(vec!["../etc/passwd".to_string()]));

        assert!(result.is_err());
        assert!(!store.root().exists());
    }
}

mod append {
    use super::*;

    #[tokio::test]
    async fn appends_to_end_of_document() {
        let (server, store, _dir) = setup();

        let response = server.test_append("progress.md", "Wrote tests", None);

        assert_eq!(response.status, AppendStatus::Success);
        let body = fs::read_to_string(store.root().join("progress.md")).unwrap();
        assert!(body.ends_with("\n[2024-05-06 07:08:09] - Wrote tests\n"));
    }

    #[tokio::test]
    async fn appends_under_section_header() {
        let (server, store, _dir) = setup();

        let response = server.test_append("activeContext.md", "Refactor store", Some("## Current Focus"));

        assert_eq!(response.status, AppendStatus::Success);
        assert!(response.message.contains("## Current Focus"));
        let body = fs::read_to_string(store.root().join("activeContext.md")).unwrap();
        assert!(body.contains(
            "## Current Focus\n[2024-05-06 07:08:09] - Refactor store\n## Recent Changes"
        ));
    }

    #[tokio::test]
    async fn returns_error_status_for_empty_entry() {
        let (server, store, _dir) = setup();

        let response = server.test_append("progress.md", "", None);

        assert_eq!(response.status, AppendStatus::Error);
        assert!(!store.root().exists());
    }

    #[tokio::test]
    async fn returns_error_status_for_empty_file_name() {
        let (server, _store, _dir) = setup();

        let response = server.test_append("", "entry", None);

        assert_eq!(response.status, AppendStatus::Error);
        assert!(response.message.contains("file_name"));
    }
}

mod append_many {
    use super::*;

    #[tokio::test]
    async fn processes_targets_independently() {
        let (server, store, _dir) = setup();

        let response = server.test_append_many(vec![
            target(Some("decisionLog.md"), None, None),
            target(Some("decisionLog.md"), Some("Adopt MCP"), Some("## Decision")),
        ]);

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].status, AppendStatus::Error);
        assert_eq!(response.results[1].status, AppendStatus::Success);
        let body = fs::read_to_string(store.root().join("decisionLog.md")).unwrap();
        assert!(body.contains("] - Adopt MCP"));
    }

    #[tokio::test]
    async fn preserves_input_order() {
        let (server, _store, _dir) = setup();

        let response = server.test_append_many(vec![
            target(Some("progress.md"), Some("a"), None),
            target(None, Some("b"), None),
            target(Some("systemPatterns.md"), Some("c"), Some("## Testing Patterns")),
        ]);

        let files: Vec<&str> = response.results.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["progress.md", "", "systemPatterns.md"]);
        assert!(response.results[0].is_success());
        assert!(!response.results[1].is_success());
        assert!(response.results[2].is_success());
    }

    #[tokio::test]
    async fn serializes_results_with_lowercase_status() {
        let (server, _store, _dir) = setup();

        let response = server.test_append_many(vec![target(Some("progress.md"), Some("a"), None)]);

        let json = serde_json::to_value(&response).expect("Serialize failed");
        assert_eq!(json["results"][0]["status"], "success");
        assert_eq!(json["results"][0]["file"], "progress.md");
    }

    #[tokio::test]
    async fn empty_batch_returns_no_results() {
        let (server, _store, _dir) = setup();

        let response = server.test_append_many(vec![]);

        assert!(response.results.is_empty());
    }
}
