//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A canonical client (identity) ID assigned by the service.
pub type ClientId = String;

/// A record ID assigned by the service when the record is written.
pub type RecordId = String;

/// A record type tag chosen by the writer (e.g., "document", "invoice").
pub type RecordType = String;

/// An age public key string (starts with "age1...").
pub type PublicKey = String;

/// Plaintext record data: field name to JSON value.
pub type Data = std::collections::BTreeMap<String, serde_json::Value>;
