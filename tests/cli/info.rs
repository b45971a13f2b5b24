//! Tests for the info command.

use crate::support::*;

#[test]
fn test_info_shows_own_credentials() {
    let t = Test::registered("alice@example.com");

    let output = t.cmd().arg("info").output().unwrap();
    assert_success(&output);
    assert!(!field(&output, "Client ID").is_empty());
    assert!(field(&output, "Public Key").starts_with("age1"));
    assert!(!field(&output, "API Key ID").is_empty());
    assert!(!field(&output, "API Secret").is_empty());
}

#[test]
fn test_info_by_email() {
    let t = Test::registered("alice@example.com");
    assert_success(&t.register("bob", "bob@example.com"));
    let bob = t.client_id("bob");

    let output = t
        .cmd()
        .args(["info", "bob@example.com"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(field(&output, "Client ID"), bob);
    assert_stdout_excludes(&output, "API Secret");
}

#[test]
fn test_info_by_client_id() {
    let t = Test::registered("alice@example.com");
    let alice = t.client_id("");

    let output = t.cmd().args(["info", alice.as_str()]).output().unwrap();
    assert_success(&output);
    assert_eq!(field(&output, "Client ID"), alice);
}

#[test]
fn test_info_unknown_client_fails() {
    let t = Test::registered("alice@example.com");

    let output = t
        .cmd()
        .args(["info", "ghost@example.com"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "client not found");
}
