//! # Dispatcher Tests
//!
//! Drive the dispatcher end to end over a recording store: argument parsing,
//! payload resolution, the single store call and the printed report.

mod common;

use aws_secret_manager::constants::DEFAULT_SECRET_DESCRIPTION;
use aws_secret_manager::{
    Cli, Dispatcher, Operation, OperationReport, PayloadError, ProviderError, ProviderErrorKind,
};
use clap::Parser;
use common::{Call, RecordingStore};
use std::fs;
use tempfile::tempdir;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["aws-secret-manager"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse")
}

/// Parse, resolve and dispatch; returns the report, printed output and calls seen
async fn run_cli(
    store: RecordingStore,
    args: &[&str],
) -> (Option<OperationReport>, String, Vec<Call>) {
    let request = parse(args)
        .secret_request()
        .expect("payload should resolve");
    let dispatcher = Dispatcher::new(store);
    let mut out = Vec::new();
    let report = dispatcher
        .dispatch(&request, &mut out)
        .await
        .expect("writing to a Vec cannot fail");
    let output = String::from_utf8(out).expect("report is UTF-8");
    (report, output, dispatcher.store().calls())
}

#[tokio::test]
async fn test_create_secret_issues_one_create_call() {
    let (report, output, calls) = run_cli(
        RecordingStore::new(),
        &["us-east-1", "create_secret", "db-pass", "hunter2"],
    )
    .await;

    assert_eq!(
        calls,
        vec![Call::Create {
            name: "db-pass".to_string(),
            description: DEFAULT_SECRET_DESCRIPTION.to_string(),
            value: Some("hunter2".to_string()),
        }]
    );
    assert!(matches!(report, Some(OperationReport::Created(_))));
    assert!(output.starts_with("Secret db-pass created successfully!\nresponse CreatedSecret {"));
}

#[tokio::test]
async fn test_get_secret_prints_retrieved_value() {
    let (report, output, calls) = run_cli(
        RecordingStore::with_value("hunter2"),
        &["us-east-1", "get_secret", "db-pass"],
    )
    .await;

    assert_eq!(
        calls,
        vec![Call::Get {
            id: "db-pass".to_string()
        }]
    );
    match report {
        Some(OperationReport::Retrieved(value)) => assert_eq!(value.as_str(), "hunter2"),
        other => panic!("Expected a retrieved value, got {other:?}"),
    }
    assert_eq!(output, "Retrieved secret: hunter2\n");
}

#[tokio::test]
async fn test_update_secret_from_json_file_sends_reencoded_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{\n  \"a\":1\n}\n").unwrap();
    let path = path.to_str().unwrap();

    let (report, output, calls) = run_cli(
        RecordingStore::new(),
        &["us-east-1", "update_secret", "db-pass", path],
    )
    .await;

    assert_eq!(
        calls,
        vec![Call::Update {
            id: "db-pass".to_string(),
            value: Some(r#"{"a": 1}"#.to_string()),
        }]
    );
    assert!(matches!(report, Some(OperationReport::Updated(_))));
    assert!(output.starts_with("Secret db-pass updated successfully!\n"));
}

#[tokio::test]
async fn test_delete_secret_always_forces_deletion() {
    let (report, output, calls) = run_cli(
        RecordingStore::new(),
        &["us-east-1", "delete_secret", "db-pass"],
    )
    .await;

    assert_eq!(
        calls,
        vec![Call::Delete {
            id: "db-pass".to_string(),
            force: true,
        }]
    );
    assert!(matches!(report, Some(OperationReport::Deleted(_))));
    assert_eq!(output, "Secret db-pass scheduled for deletion!\n");
}

#[test]
fn test_missing_json_file_fails_before_any_call() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let missing = missing.to_str().unwrap();

    let err = parse(&["us-east-1", "create_secret", "db-pass", missing])
        .secret_request()
        .unwrap_err();

    assert!(matches!(err, PayloadError::NotFound { .. }));
    assert_eq!(err.to_string(), format!("File {missing} not found."));
}

#[test]
fn test_invalid_json_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{not json").unwrap();

    let err = parse(&["us-east-1", "update_secret", "db-pass", path.to_str().unwrap()])
        .secret_request()
        .unwrap_err();

    assert!(matches!(err, PayloadError::InvalidJson { .. }));
}

#[tokio::test]
async fn test_remote_failure_is_reported_not_raised() {
    let denied = ProviderError::from_service_code(
        "AccessDeniedException",
        "User is not authorized to perform: secretsmanager:CreateSecret",
    );

    let cases = [
        (vec!["us-east-1", "create_secret", "db-pass", "hunter2"], "Error creating secret: "),
        (vec!["us-east-1", "get_secret", "db-pass"], "Error retrieving secret: "),
        (vec!["us-east-1", "update_secret", "db-pass", "hunter2"], "Error updating secret: "),
        (vec!["us-east-1", "delete_secret", "db-pass"], "Error deleting secret: "),
    ];

    for (args, prefix) in cases {
        let (report, output, calls) =
            run_cli(RecordingStore::failing(denied.clone()), &args).await;

        assert!(report.is_none(), "{args:?} should yield an empty result");
        assert_eq!(calls.len(), 1, "{args:?} should issue exactly one call");
        assert!(output.starts_with(prefix), "unexpected output: {output}");
        assert!(output.contains("AccessDenied") || output.contains("access_denied"));
        assert!(output.contains("secretsmanager:CreateSecret"));
    }
}

#[tokio::test]
async fn test_try_dispatch_exposes_error_kind() {
    let store = RecordingStore::failing(ProviderError::from_service_code(
        "ResourceNotFoundException",
        "Secrets Manager can't find the specified secret.",
    ));
    let request = parse(&["us-east-1", "get_secret", "db-pass"])
        .secret_request()
        .unwrap();

    let err = Dispatcher::new(store)
        .try_dispatch(&request)
        .await
        .unwrap_err();

    assert_eq!(err.operation, Operation::GetSecret);
    assert_eq!(err.secret_name, "db-pass");
    assert_eq!(err.source.kind, ProviderErrorKind::NotFound);
}

#[tokio::test]
async fn test_value_is_not_sent_for_get_and_delete() {
    let (_, _, get_calls) = run_cli(
        RecordingStore::new(),
        &["us-east-1", "get_secret", "db-pass", "unused"],
    )
    .await;
    let (_, _, delete_calls) = run_cli(
        RecordingStore::new(),
        &["us-east-1", "delete_secret", "db-pass", "unused"],
    )
    .await;

    assert_eq!(
        get_calls,
        vec![Call::Get {
            id: "db-pass".to_string()
        }]
    );
    assert_eq!(
        delete_calls,
        vec![Call::Delete {
            id: "db-pass".to_string(),
            force: true,
        }]
    );
}

#[tokio::test]
async fn test_create_without_value_passes_absence_through() {
    let (_, _, calls) = run_cli(
        RecordingStore::new(),
        &["us-east-1", "create_secret", "db-pass"],
    )
    .await;

    assert_eq!(
        calls,
        vec![Call::Create {
            name: "db-pass".to_string(),
            description: DEFAULT_SECRET_DESCRIPTION.to_string(),
            value: None,
        }]
    );
}
