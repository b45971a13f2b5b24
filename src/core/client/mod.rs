//! Record-store client.
//!
//! The [`Client`] trait is everything the rest of the crate needs from the
//! encrypted record store: identity lookups, record CRUD, paged queries,
//! decryption and access grants. Transport, storage and cryptography live
//! behind it.
//!
//! ## Backends
//!
//! - **local** (`file://` base URLs): a directory-backed service, see
//!   [`LocalService`].
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Client` trait
//! 2. Add the implementation in a new file (e.g., `http.rs`)
//! 3. Dispatch on its URL scheme in [`connect`] and [`register`]

use serde::{Deserialize, Serialize};

use crate::core::domain::{ClientInfo, Record, RecordMeta};
use crate::core::profile::Profile;
use crate::core::query::QueryFilter;
use crate::core::types::{ClientId, Data, RecordId};
use crate::error::{Result, ServiceError};

mod local;

pub use local::{LocalClient, LocalService};

/// A record as returned by a query, before decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedRecord {
    pub meta: RecordMeta,
    /// Encrypted data, absent when the query excluded data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ciphertext: Option<String>,
}

/// One page of query results.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub records: Vec<SealedRecord>,
    /// Position of the last record in the page; pass it back as
    /// `after_index` to fetch the next page.
    pub last_index: u64,
}

/// Options for registering a new client.
#[derive(Debug, Clone, Default)]
pub struct RegistrationOptions {
    /// Record-store service base URL
    pub api_url: String,
    /// Auth service base URL, recorded in the profile
    pub auth_url: Option<String>,
    /// Allow other clients to find this client by email
    pub find_by_email: bool,
    /// Log each service request
    pub logging: bool,
}

/// Record-store client operations.
///
/// All calls block until the service answers. Implementations never retry.
pub trait Client {
    /// ID of the client this handle acts as.
    fn client_id(&self) -> &str;

    /// Public information about another client, by client ID or email.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::ClientNotFound` if no such client is visible.
    fn client_info(&self, id_or_email: &str) -> Result<ClientInfo>;

    /// Encrypt and store a new record, returning its ID.
    fn write(&self, record_type: &str, data: Data) -> Result<RecordId>;

    /// Fetch and decrypt a record.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if the record does not exist or is not
    /// readable by this client.
    fn read(&self, record_id: &str) -> Result<Record>;

    /// Delete a record written by this client.
    fn delete(&self, record_id: &str) -> Result<()>;

    /// Fetch up to `limit` matching records positioned after `after_index`.
    ///
    /// A page shorter than `limit` means there is nothing further.
    fn query(&self, filter: &QueryFilter, after_index: u64, limit: usize) -> Result<Page>;

    /// Decrypt a record returned by [`Client::query`].
    fn open(&self, sealed: SealedRecord) -> Result<Record>;

    /// Allow `reader_id` to read every record of `record_type` written by
    /// this client. Repeating a grant is not an error.
    fn share(&self, record_type: &str, reader_id: &ClientId) -> Result<()>;

    /// Revoke a grant made with [`Client::share`]. Revoking an absent grant
    /// is not an error.
    fn unshare(&self, record_type: &str, reader_id: &ClientId) -> Result<()>;
}

/// Connect to the service named in a profile.
///
/// # Errors
///
/// Returns `ServiceError::UnsupportedUrl` for non-`file://` URLs, or
/// `ServiceError::Unauthorized` if the credentials are rejected.
pub fn connect(profile: &Profile, default_api_url: &str, logging: bool) -> Result<Box<dyn Client>> {
    let url = profile.api_url.as_deref().unwrap_or(default_api_url);
    let service = LocalService::from_url(url, logging)?;
    Ok(Box::new(service.authenticate(profile)?))
}

/// Register a new client with the service at `opts.api_url`.
///
/// Returns the complete credential bundle for the new client.
///
/// # Errors
///
/// Returns `ServiceError::UnsupportedUrl` for non-`file://` URLs, or
/// `ServiceError::EmailTaken` if the email is already registered.
pub fn register(email: &str, opts: &RegistrationOptions) -> Result<Profile> {
    let service = LocalService::from_url(&opts.api_url, opts.logging)?;
    service.register(email, opts)
}

/// Parse a `file://` base URL into a directory path.
pub(crate) fn file_url_path(url: &str) -> Result<std::path::PathBuf> {
    match url.strip_prefix(crate::core::constants::FILE_SCHEME) {
        Some(path) if !path.is_empty() => Ok(std::path::PathBuf::from(path)),
        _ => Err(ServiceError::UnsupportedUrl(url.to_string()).into()),
    }
}
