//! Tests for writing, reading and deleting records.

use crate::support::*;

#[test]
fn test_write_then_read() {
    let t = Test::registered("alice@example.com");
    let alice = t.client_id("");

    let id = t.write("", "note", r#"{"title":"hello","tags":["a","b"]}"#);
    assert!(!id.is_empty());

    let output = t.read("", &[id.as_str()]);
    assert_success(&output);

    let record = json(&output);
    assert_eq!(record["meta"]["record_id"], id.as_str());
    assert_eq!(record["meta"]["type"], "note");
    assert_eq!(record["meta"]["writer_id"], alice.as_str());
    assert_eq!(record["data"]["title"], "hello");
    assert_eq!(record["data"]["tags"][1], "b");
}

#[test]
fn test_read_several_records() {
    let t = Test::registered("alice@example.com");
    let first = t.write("", "note", r#"{"n":"1"}"#);
    let second = t.write("", "note", r#"{"n":"2"}"#);

    let output = t.read("", &[first.as_str(), second.as_str()]);
    assert_success(&output);

    let out = stdout(&output);
    let first_at = out.find(first.as_str()).unwrap();
    let second_at = out.find(second.as_str()).unwrap();
    assert!(first_at < second_at);
}

#[test]
fn test_read_missing_record_fails() {
    let t = Test::registered("alice@example.com");

    let output = t.read("", &["no-such-record"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "e3db-cli: record not found: no-such-record");
}

#[test]
fn test_write_malformed_json_fails() {
    let t = Test::registered("alice@example.com");

    let output = t
        .cmd()
        .args(["write", "note", "{not json"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid record data");
}

#[test]
fn test_write_non_object_fails() {
    let t = Test::registered("alice@example.com");

    let output = t
        .cmd()
        .args(["write", "note", "[1, 2, 3]"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "expected a JSON object");
}

#[test]
fn test_write_empty_type_fails() {
    let t = Test::registered("alice@example.com");

    let output = t.cmd().args(["write", "", "{}"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "record type cannot be empty");
}

#[test]
fn test_delete_record() {
    let t = Test::registered("alice@example.com");
    let id = t.write("", "note", r#"{"n":"1"}"#);

    let output = t.cmd().args(["delete", id.as_str()]).output().unwrap();
    assert_success(&output);

    assert_failure(&t.read("", &[id.as_str()]));
    assert_eq!(stdout(&t.ls("", &[])), "");
}

#[test]
fn test_delete_stops_at_first_failure() {
    let t = Test::registered("alice@example.com");
    let id = t.write("", "note", r#"{"n":"1"}"#);

    let output = t
        .cmd()
        .args(["delete", "no-such-record", id.as_str()])
        .output()
        .unwrap();
    assert_failure(&output);

    // The record after the failing one is untouched.
    assert_success(&t.read("", &[id.as_str()]));
}

#[test]
fn test_record_data_is_encrypted_at_rest() {
    let t = Test::registered("alice@example.com");
    let id = t.write("", "note", r#"{"secret":"hunter2"}"#);

    let stored =
        std::fs::read_to_string(t.service_dir().join("records").join(format!("{}.json", id)))
            .unwrap();
    assert!(stored.contains("BEGIN AGE ENCRYPTED FILE"));
    assert!(!stored.contains("hunter2"));
}
