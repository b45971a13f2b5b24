//! Record type.
//!
//! A record is metadata plus a plaintext data map. Encryption happens in the
//! client before a record is stored and after it is fetched, so every
//! `Record` seen by the rest of the crate is already decrypted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{ClientId, Data, RecordId, RecordType};

/// Record metadata. Never encrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub record_id: RecordId,
    pub writer_id: ClientId,
    pub user_id: ClientId,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// A decrypted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub meta: RecordMeta,
    #[serde(default)]
    pub data: Data,
}

impl Record {
    /// Record ID shortcut.
    pub fn id(&self) -> &str {
        &self.meta.record_id
    }

    /// Record type shortcut.
    pub fn record_type(&self) -> &str {
        &self.meta.record_type
    }
}
