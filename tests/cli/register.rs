//! Tests for client registration and profiles.

use crate::support::*;

#[test]
fn test_register_default_profile() {
    let t = Test::new();

    let output = t.register("", "alice@example.com");
    assert_success(&output);
    assert_stdout_contains(&output, "registered alice@example.com");
    assert!(!field(&output, "Client ID").is_empty());

    assert!(t.config_dir().join("config.toml").exists());
    assert_eq!(t.registered_clients(), 1);
}

#[test]
fn test_register_named_profile() {
    let t = Test::new();

    let output = t.register("work", "alice@example.com");
    assert_success(&output);

    assert!(t.config_dir().join("profiles").join("work.toml").exists());
    assert!(!t.config_dir().join("config.toml").exists());
}

#[test]
fn test_register_existing_profile_fails_before_registering() {
    let t = Test::new();
    assert_success(&t.register("work", "alice@example.com"));

    let output = t.register("work", "bob@example.com");
    assert_failure(&output);
    assert_stderr_contains(&output, "e3db-cli: profile work already registered");
    assert_eq!(stderr(&output).lines().count(), 1);

    // Only the first registration reached the service.
    assert_eq!(t.registered_clients(), 1);
}

#[test]
fn test_register_existing_default_profile_fails() {
    let t = Test::registered("alice@example.com");

    let output = t.register("", "bob@example.com");
    assert_failure(&output);
    assert_stderr_contains(&output, "already registered");
    assert_eq!(t.registered_clients(), 1);
}

#[test]
fn test_profiles_are_distinct_identities() {
    let t = Test::registered("alice@example.com");
    assert_success(&t.register("bob", "bob@example.com"));

    assert_ne!(t.client_id(""), t.client_id("bob"));
}

#[test]
fn test_profile_from_environment() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("E3DB_PROFILE", "work")
        .args(["register", "alice@example.com"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.config_dir().join("profiles").join("work.toml").exists());
}

#[test]
fn test_register_invalid_email_fails() {
    let t = Test::new();

    let output = t.register("", "not-an-email");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid email address");
    assert_eq!(t.registered_clients(), 0);
}

#[test]
fn test_register_invalid_profile_name_fails() {
    let t = Test::new();

    let output = t.register("../escape", "alice@example.com");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid profile name");
    assert_eq!(t.registered_clients(), 0);
}

#[test]
fn test_register_same_email_twice_fails() {
    let t = Test::registered("alice@example.com");

    let output = t.register("second", "alice@example.com");
    assert_failure(&output);
    assert_stderr_contains(&output, "email already registered");
    assert!(!t.config_dir().join("profiles").join("second.toml").exists());
}

#[test]
fn test_register_rejects_remote_service_url() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["register", "--api", "https://api.e3db.com", "alice@example.com"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "unsupported service url");
    assert!(!t.config_dir().join("config.toml").exists());
}

#[cfg(unix)]
#[test]
fn test_profile_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::registered("alice@example.com");

    let mode = std::fs::metadata(t.config_dir().join("config.toml"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
