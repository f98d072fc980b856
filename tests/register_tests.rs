//! Register Workflow Tests
//!
//! Checks the outgoing request body and status handling against a mock registry.

use std::fs;
use std::path::PathBuf;

use mockito::{Matcher, Server};
use schema_sync::{register, RegisterOptions, SyncError, SCHEMA_REGISTRY_CONTENT_TYPE};
use serde_json::json;

fn schema_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn assert_registers_as(filename: &str, content: &str, expected_type: &str) {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/subjects/orders-value/versions")
        .match_header("content-type", SCHEMA_REGISTRY_CONTENT_TYPE)
        .match_body(Matcher::Json(json!({
            "schema": content,
            "schemaType": expected_type,
        })))
        .with_status(200)
        .with_body(r#"{"id":1}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let file = schema_file(&dir, filename, content);
    let options = RegisterOptions::new(server.url(), "orders-value", file).unwrap();

    let response = register(&options).unwrap();
    assert_eq!(response, r#"{"id":1}"#);
    mock.assert();
}

// =============================================================================
// Schema type inference
// =============================================================================

#[test]
fn test_proto_registers_as_protobuf() {
    assert_registers_as(
        "schema.proto",
        "syntax = \"proto3\";\nmessage Order { string id = 1; }\n",
        "PROTOBUF",
    );
}

#[test]
fn test_json_registers_as_jsonschema() {
    assert_registers_as("schema.json", r#"{"type":"object"}"#, "JSONSCHEMA");
}

#[test]
fn test_avsc_registers_as_avro() {
    assert_registers_as("schema.avsc", r#"{"type":"string"}"#, "AVRO");
}

#[test]
fn test_schema_type_omitted_when_disabled() {
    let mut server = Server::new();
    let content = r#"{"type":"record","name":"Order","fields":[]}"#;
    let mock = server
        .mock("POST", "/subjects/orders-value/versions")
        .match_body(Matcher::Json(json!({ "schema": content })))
        .with_status(200)
        .with_body(r#"{"id":7}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let file = schema_file(&dir, "schema.avsc", content);
    let mut options = RegisterOptions::new(server.url(), "orders-value", file).unwrap();
    options.include_schema_type = false;

    assert_eq!(register(&options).unwrap(), r#"{"id":7}"#);
    mock.assert();
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_conflict_reports_status_and_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/subjects/orders-value/versions")
        .with_status(409)
        .with_body(r#"{"error_code":409,"message":"Schema being registered is incompatible"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let file = schema_file(&dir, "schema.avsc", r#"{"type":"int"}"#);
    let mut options = RegisterOptions::new(server.url(), "orders-value", file).unwrap();
    options.version = "3".to_string();

    let err = register(&options).unwrap_err();
    mock.assert();

    let msg = err.to_string();
    assert!(matches!(err, SyncError::Upload { .. }));
    assert!(msg.contains("orders-value"));
    assert!(msg.contains("version 3"));
    assert!(msg.contains("409"));
    assert!(msg.contains("incompatible"));
}

#[test]
fn test_missing_file_makes_no_request() {
    let mut server = Server::new();
    let never = server.mock("POST", Matcher::Any).expect(0).create();

    let options = RegisterOptions::new(server.url(), "orders-value", "/nonexistent/schema.avsc").unwrap();
    let err = register(&options).unwrap_err();

    never.assert();
    assert!(matches!(err, SyncError::Open { .. }));
    assert!(!err.is_remote());
}

#[test]
fn test_success_range_ends_before_300() {
    let mut server = Server::new();
    let ok = server
        .mock("POST", "/subjects/orders-value/versions")
        .with_status(299)
        .with_body(r#"{"id":2}"#)
        .create();
    let redirect = server
        .mock("POST", "/subjects/payments-value/versions")
        .with_status(300)
        .with_body("choices")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let file = schema_file(&dir, "schema.avsc", r#"{"type":"long"}"#);

    let options = RegisterOptions::new(server.url(), "orders-value", &file).unwrap();
    assert_eq!(register(&options).unwrap(), r#"{"id":2}"#);

    let options = RegisterOptions::new(server.url(), "payments-value", &file).unwrap();
    let err = register(&options).unwrap_err();

    ok.assert();
    redirect.assert();
    match err {
        SyncError::Upload { source, .. } => match *source {
            SyncError::Status { status, body } => {
                assert_eq!(status.as_u16(), 300);
                assert_eq!(body.as_deref(), Some("choices"));
            }
            other => panic!("Expected Status, got {:?}", other),
        },
        other => panic!("Expected Upload, got {:?}", other),
    }
}

#[test]
fn test_invalid_utf8_is_sent_with_replacement_chars() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/subjects/orders-value/versions")
        .match_body(Matcher::Json(json!({
            "schema": "\"str\u{FFFD}ng\"",
            "schemaType": "AVRO",
        })))
        .with_status(200)
        .with_body(r#"{"id":3}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.avsc");
    fs::write(&path, b"\"str\xffng\"").unwrap();

    let options = RegisterOptions::new(server.url(), "orders-value", path).unwrap();
    assert_eq!(register(&options).unwrap(), r#"{"id":3}"#);
    mock.assert();
}
