//! Error types.
//!
//! Each concern has its own enum; everything converges on [`Error`], which the
//! binary prints as a single line before exiting.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Local profile storage errors.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("profile {0} already registered")]
    Conflict(String),

    #[error("profile {0} not found")]
    NotFound(String),

    #[error("unable to determine home directory")]
    NoHome,

    #[error("failed to read profile {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write profile {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed profile {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize profile: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Identifier resolution errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("could not resolve '{email}': {source}")]
    Lookup {
        email: String,
        #[source]
        source: Box<Error>,
    },
}

/// Record access errors.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("record not found: {0}")]
    NotFound(String),
}

/// Malformed user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("invalid record data: {0}")]
    InvalidData(String),

    #[error("invalid profile name '{name}': {reason}")]
    InvalidProfileName { name: String, reason: String },

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// Failures reported by the record-store client.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("unsupported service url '{0}' (expected file://)")]
    UnsupportedUrl(String),

    #[error("service not reachable at {0}")]
    Unreachable(String),

    #[error("unauthorized: invalid credentials for client {0}")]
    Unauthorized(String),

    #[error("client not found: {0}")]
    ClientNotFound(String),

    #[error("email already registered: {0}")]
    EmailTaken(String),

    #[error("decryption failed for record {record_id}: {reason}")]
    DecryptionFailed { record_id: String, reason: String },

    #[error("corrupt service data at {path}: {reason}")]
    Corrupt { path: String, reason: String },
}

/// Encryption backend errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("armor encoding failed: {0}")]
    ArmorFailed(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
