//! Tests for record listing.

use crate::support::*;

#[test]
fn test_ls_plain_lines() {
    let t = Test::registered("alice@example.com");
    let first = t.write("", "note", r#"{"n":"1"}"#);
    let second = t.write("", "contact", r#"{"n":"2"}"#);

    let output = t.ls("", &[]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        format!("{:<40} note\n{:<40} contact\n", first, second)
    );
}

#[test]
fn test_ls_empty() {
    let t = Test::registered("alice@example.com");

    let output = t.ls("", &[]);
    assert_success(&output);
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_ls_json_empty_is_valid_array() {
    let t = Test::registered("alice@example.com");

    let output = t.ls("", &["-j"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "[\n]\n");
    assert_eq!(json(&output), serde_json::json!([]));
}

#[test]
fn test_ls_json_array() {
    let t = Test::registered("alice@example.com");
    let first = t.write("", "note", r#"{"n":"1"}"#);
    let second = t.write("", "note", r#"{"n":"2"}"#);

    let output = t.ls("", &["--json"]);
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.starts_with("[\n"));
    assert!(out.ends_with("\n]\n"));

    let records = json(&output);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["meta"]["record_id"], first.as_str());
    assert_eq!(records[1]["meta"]["record_id"], second.as_str());
    // Data is only fetched with -d.
    assert_eq!(records[0]["data"], serde_json::json!({}));
}

#[test]
fn test_ls_json_with_data() {
    let t = Test::registered("alice@example.com");
    t.write("", "note", r#"{"title":"hello"}"#);

    let output = t.ls("", &["-j", "-d"]);
    assert_success(&output);
    assert_eq!(json(&output)[0]["data"]["title"], "hello");
}

#[test]
fn test_ls_filters_by_type() {
    let t = Test::registered("alice@example.com");
    let note = t.write("", "note", "{}");
    let contact = t.write("", "contact", "{}");

    let output = t.ls("", &["-t", "contact"]);
    assert_success(&output);
    assert_stdout_contains(&output, &contact);
    assert_stdout_excludes(&output, &note);
}

#[test]
fn test_ls_filters_by_record_id() {
    let t = Test::registered("alice@example.com");
    let first = t.write("", "note", "{}");
    let second = t.write("", "note", "{}");
    let third = t.write("", "note", "{}");

    let output = t.ls("", &["-r", first.as_str(), "--record", third.as_str()]);
    assert_success(&output);
    assert_stdout_contains(&output, &first);
    assert_stdout_contains(&output, &third);
    assert_stdout_excludes(&output, &second);
}

#[test]
fn test_ls_more_than_one_page() {
    let t = Test::registered("alice@example.com");
    let ids: Vec<String> = (0..55)
        .map(|i| t.write("", "note", &format!(r#"{{"n":"{}"}}"#, i)))
        .collect();

    let output = t.ls("", &[]);
    assert_success(&output);

    let listed: Vec<String> = stdout(&output)
        .lines()
        .map(|line| line.split_whitespace().next().unwrap().to_string())
        .collect();
    assert_eq!(listed, ids);
}

#[test]
fn test_ls_writer_by_email() {
    let t = Test::registered("alice@example.com");
    assert_success(&t.register("bob", "bob@example.com"));

    let shared = t.write("", "document", r#"{"n":"1"}"#);
    t.write("bob", "document", r#"{"n":"2"}"#);
    assert_success(&t.share("", "document", "bob@example.com"));

    let output = t.ls("bob", &["-t", "document", "-w", "alice@example.com"]);
    assert_success(&output);
    assert_eq!(stdout(&output), format!("{:<40} document\n", shared));
}

#[test]
fn test_ls_unknown_writer_email_fails() {
    let t = Test::registered("alice@example.com");
    t.write("", "note", "{}");

    let output = t.ls("", &["-w", "ghost@example.com"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "could not resolve 'ghost@example.com'");
    assert_eq!(stdout(&output), "");
}
