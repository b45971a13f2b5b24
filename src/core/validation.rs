//! Input validation for e3db-cli operations.
//!
//! Validates profile names, email addresses, record types and record data.

use crate::core::constants::MAX_PROFILE_NAME_LEN;
use crate::core::types::Data;
use crate::error::{Result, ValidationError};

/// Validate a profile name.
///
/// The empty name is the default profile and always valid. Other names:
/// - 1 to 64 characters
/// - Only A-Z, a-z, 0-9, `_`, `-` and `.`
/// - Cannot start with `.`
///
/// # Errors
///
/// Returns `ValidationError::InvalidProfileName` if the name is invalid.
pub fn validate_profile_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Ok(());
    }

    let invalid = |reason: String| -> crate::error::Error {
        ValidationError::InvalidProfileName {
            name: name.to_string(),
            reason,
        }
        .into()
    };

    if name.len() > MAX_PROFILE_NAME_LEN {
        return Err(invalid(format!(
            "longer than {} characters",
            MAX_PROFILE_NAME_LEN
        )));
    }

    if name.starts_with('.') {
        return Err(invalid("cannot start with '.'".to_string()));
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && !matches!(ch, '_' | '-' | '.') {
            return Err(invalid(format!(
                "invalid character '{}' at position {}",
                ch,
                i + 1
            )));
        }
    }

    Ok(())
}

/// Minimal email sanity check: one `@` with non-empty local part and a
/// domain containing a dot, and no whitespace.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidEmail(email.to_string()).into());
    }

    Ok(())
}

/// Require a non-empty argument.
///
/// # Errors
///
/// Returns `ValidationError::Empty` naming `field` if `value` is blank.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field }.into());
    }
    Ok(())
}

/// Parse a JSON object literal into record data.
///
/// # Errors
///
/// Returns `ValidationError::InvalidData` if the input is not valid JSON or is
/// not an object.
pub fn parse_data(input: &str) -> Result<Data> {
    let value: serde_json::Value = serde_json::from_str(input)
        .map_err(|e| ValidationError::InvalidData(e.to_string()))?;

    match value {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(ValidationError::InvalidData(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))
        .into()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Permission bits of a file if they are looser than `expected_mode` (Unix only).
#[cfg(unix)]
pub fn loose_permissions(path: &std::path::Path, expected_mode: u32) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path).ok()?.permissions().mode() & 0o777;
    (mode & !expected_mode != 0).then_some(mode)
}
