//! Directory-backed record-store service.
//!
//! Serves `file://` base URLs. The directory plays the role of the remote
//! service:
//!
//! ```text
//! <root>/
//! ├── state.json            # insertion counter, record index, access grants
//! ├── clients/<id>.json     # registered clients (api secrets stored hashed)
//! └── records/<id>.json     # metadata + age-armored data
//! ```
//!
//! Record data is encrypted to the writer and every reader granted access to
//! the writer's records of that type. Changing a grant re-encrypts the
//! affected records before the new grant set is saved.
//!
//! Queries run against the metadata index in `state.json`; record files are
//! only opened for the page being returned.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use age::x25519;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, trace};
use uuid::Uuid;

use super::{file_url_path, Client, Page, RegistrationOptions, SealedRecord};
use crate::core::cipher;
use crate::core::constants;
use crate::core::domain::{ClientInfo, Record, RecordMeta};
use crate::core::profile::Profile;
use crate::core::query::QueryFilter;
use crate::core::types::{ClientId, Data, RecordId};
use crate::error::{RecordError, Result, ServiceError};

const STATE_FILE: &str = "state.json";
const CLIENTS_DIR: &str = "clients";
const RECORDS_DIR: &str = "records";

/// A registered client as the service stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClientEntry {
    client_id: ClientId,
    email: String,
    public_key: String,
    api_key_id: String,
    api_secret_sha256: String,
    discoverable: bool,
}

/// Permission for `reader_id` to read `writer_id`'s records of `record_type`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
struct Grant {
    writer_id: ClientId,
    record_type: String,
    reader_id: ClientId,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ServiceState {
    next_index: u64,
    /// Metadata of every stored record, by insertion index
    #[serde(default)]
    records: BTreeMap<u64, RecordMeta>,
    #[serde(default)]
    grants: BTreeSet<Grant>,
}

impl ServiceState {
    fn index_of(&self, record_id: &str) -> Option<u64> {
        self.records
            .iter()
            .find(|(_, meta)| meta.record_id == record_id)
            .map(|(index, _)| *index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    index: u64,
    meta: RecordMeta,
    ciphertext: String,
}

/// Handle on a service directory, not yet authenticated.
#[derive(Debug, Clone)]
pub struct LocalService {
    root: PathBuf,
    logging: bool,
}

impl LocalService {
    /// Service rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>, logging: bool) -> Self {
        Self {
            root: root.into(),
            logging,
        }
    }

    /// Service for a `file://` base URL.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UnsupportedUrl` for any other scheme.
    pub fn from_url(url: &str, logging: bool) -> Result<Self> {
        Ok(Self::new(file_url_path(url)?, logging))
    }

    /// Service directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register a new client and return its credentials.
    ///
    /// Creates the service directory on first use.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::EmailTaken` if another client uses `email`.
    pub fn register(&self, email: &str, opts: &RegistrationOptions) -> Result<Profile> {
        self.request("register");

        fs::create_dir_all(self.root.join(CLIENTS_DIR))?;
        fs::create_dir_all(self.root.join(RECORDS_DIR))?;

        if self.find_by_email(email)?.is_some() {
            return Err(ServiceError::EmailTaken(email.to_string()).into());
        }

        let (public_key, private_key) = cipher::generate_keypair();
        let client_id = Uuid::new_v4().to_string();
        let api_key_id = Uuid::new_v4().simple().to_string();

        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        let api_secret = URL_SAFE_NO_PAD.encode(secret);

        let entry = ClientEntry {
            client_id: client_id.clone(),
            email: email.to_string(),
            public_key: public_key.clone(),
            api_key_id: api_key_id.clone(),
            api_secret_sha256: hash_secret(&api_secret),
            discoverable: opts.find_by_email,
        };
        write_json(&self.client_path(&client_id), &entry)?;

        debug!(client_id = %client_id, discoverable = opts.find_by_email, "client registered");

        Ok(Profile {
            version: constants::PROFILE_VERSION,
            client_id,
            client_email: email.to_string(),
            public_key,
            private_key,
            api_key_id,
            api_secret,
            api_url: Some(opts.api_url.clone()),
            auth_url: opts.auth_url.clone(),
        })
    }

    /// Check a profile's credentials and return a client acting as it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unreachable` if the service directory does not
    /// exist, `ServiceError::Unauthorized` if the credentials do not match.
    pub fn authenticate(self, profile: &Profile) -> Result<LocalClient> {
        self.request("authenticate");

        if !self.root.is_dir() {
            return Err(ServiceError::Unreachable(self.root.display().to_string()).into());
        }

        let unauthorized = || ServiceError::Unauthorized(profile.client_id.clone());
        let entry: ClientEntry =
            read_json(&self.client_path(&profile.client_id))?.ok_or_else(unauthorized)?;

        if entry.api_key_id != profile.api_key_id
            || entry.api_secret_sha256 != hash_secret(&profile.api_secret)
        {
            return Err(unauthorized().into());
        }

        let identity = cipher::parse_identity(&profile.private_key)?;
        debug!(client_id = %entry.client_id, "authenticated");

        Ok(LocalClient {
            service: self,
            client_id: entry.client_id,
            public_key: entry.public_key,
            identity,
        })
    }

    fn request(&self, op: &'static str) {
        if self.logging {
            info!(op, service = %self.root.display(), "service request");
        } else {
            trace!(op, "service request");
        }
    }

    fn client_path(&self, client_id: &str) -> PathBuf {
        self.root
            .join(CLIENTS_DIR)
            .join(format!("{}.json", safe_name(client_id)))
    }

    fn record_path(&self, record_id: &str) -> PathBuf {
        self.root
            .join(RECORDS_DIR)
            .join(format!("{}.json", safe_name(record_id)))
    }

    fn load_client(&self, client_id: &str) -> Result<Option<ClientEntry>> {
        read_json(&self.client_path(client_id))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<ClientEntry>> {
        let wanted = email.to_lowercase();
        Ok(self
            .load_all::<ClientEntry>(CLIENTS_DIR)?
            .into_iter()
            .find(|c| c.email.to_lowercase() == wanted))
    }

    fn load_state(&self) -> Result<ServiceState> {
        Ok(read_json(&self.root.join(STATE_FILE))?.unwrap_or_default())
    }

    fn save_state(&self, state: &ServiceState) -> Result<()> {
        write_json(&self.root.join(STATE_FILE), state)
    }

    fn load_record(&self, record_id: &str) -> Result<StoredRecord> {
        read_json::<StoredRecord>(&self.record_path(record_id))?
            .filter(|r| r.meta.record_id == record_id)
            .ok_or_else(|| RecordError::NotFound(record_id.to_string()).into())
    }

    fn load_all<T: DeserializeOwned>(&self, dir: &str) -> Result<Vec<T>> {
        let dir = self.root.join(dir);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut items = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(item) = read_json(&path)? {
                    items.push(item);
                }
            }
        }
        Ok(items)
    }
}

/// Authenticated client backed by a [`LocalService`].
pub struct LocalClient {
    service: LocalService,
    client_id: ClientId,
    public_key: String,
    identity: x25519::Identity,
}

impl LocalClient {
    /// Whether this client may read `record`.
    fn can_read(&self, meta: &RecordMeta, grants: &BTreeSet<Grant>) -> bool {
        meta.writer_id == self.client_id
            || grants.contains(&Grant {
                writer_id: meta.writer_id.clone(),
                record_type: meta.record_type.clone(),
                reader_id: self.client_id.clone(),
            })
    }

    /// Recipients for this client's records of `record_type`.
    fn recipients(&self, record_type: &str, state: &ServiceState) -> Result<Vec<x25519::Recipient>> {
        let mut recipients = vec![cipher::parse_recipient(&self.public_key)?];
        for grant in &state.grants {
            if grant.writer_id != self.client_id || grant.record_type != record_type {
                continue;
            }
            match self.service.load_client(&grant.reader_id)? {
                Some(reader) => recipients.push(cipher::parse_recipient(&reader.public_key)?),
                None => debug!(reader_id = %grant.reader_id, "skipping grant for unknown client"),
            }
        }
        Ok(recipients)
    }

    fn decrypt_data(&self, record_id: &str, ciphertext: &str) -> Result<Data> {
        let failed = |reason: String| ServiceError::DecryptionFailed {
            record_id: record_id.to_string(),
            reason,
        };
        let plaintext =
            cipher::decrypt(ciphertext, &self.identity).map_err(|e| failed(e.to_string()))?;
        serde_json::from_str(&plaintext).map_err(|e| failed(e.to_string()).into())
    }

    /// Re-encrypt this client's records of `record_type` for the current
    /// recipient set.
    fn reencrypt(&self, record_type: &str, state: &ServiceState) -> Result<usize> {
        let recipients = self.recipients(record_type, state)?;
        let mut count = 0;

        for meta in state.records.values() {
            if meta.writer_id != self.client_id || meta.record_type != record_type {
                continue;
            }
            let mut stored = self.service.load_record(&meta.record_id)?;
            let data = self.decrypt_data(&stored.meta.record_id, &stored.ciphertext)?;
            stored.ciphertext = cipher::encrypt(&serde_json::to_string(&data)?, &recipients)?;
            write_json(&self.service.record_path(&stored.meta.record_id), &stored)?;
            count += 1;
        }

        debug!(record_type, count, recipients = recipients.len(), "records re-encrypted");
        Ok(count)
    }

    fn set_grant(&self, record_type: &str, reader_id: &ClientId, granted: bool) -> Result<()> {
        if self.service.load_client(reader_id)?.is_none() {
            return Err(ServiceError::ClientNotFound(reader_id.clone()).into());
        }

        let grant = Grant {
            writer_id: self.client_id.clone(),
            record_type: record_type.to_string(),
            reader_id: reader_id.clone(),
        };

        let mut state = self.service.load_state()?;
        let changed = if granted {
            state.grants.insert(grant)
        } else {
            state.grants.remove(&grant)
        };

        // Records are rewritten even for an unchanged grant, so repeating a
        // call finishes an earlier one that failed partway.
        self.reencrypt(record_type, &state)?;

        if changed {
            self.service.save_state(&state)?;
        } else {
            debug!(record_type, reader_id = %reader_id, granted, "grant unchanged");
        }
        Ok(())
    }
}

impl Client for LocalClient {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_info(&self, id_or_email: &str) -> Result<ClientInfo> {
        self.service.request("client_info");

        let entry = if id_or_email.contains('@') {
            self.service
                .find_by_email(id_or_email)?
                .filter(|c| c.discoverable || c.client_id == self.client_id)
        } else {
            self.service.load_client(id_or_email)?
        };

        entry
            .map(|c| ClientInfo {
                client_id: c.client_id,
                public_key: c.public_key,
            })
            .ok_or_else(|| ServiceError::ClientNotFound(id_or_email.to_string()).into())
    }

    fn write(&self, record_type: &str, data: Data) -> Result<RecordId> {
        self.service.request("write");

        let mut state = self.service.load_state()?;
        let recipients = self.recipients(record_type, &state)?;
        let ciphertext = cipher::encrypt(&serde_json::to_string(&data)?, &recipients)?;

        state.next_index += 1;
        let index = state.next_index;

        let now = Utc::now();
        let record_id = Uuid::new_v4().to_string();
        let stored = StoredRecord {
            index,
            meta: RecordMeta {
                record_id: record_id.clone(),
                writer_id: self.client_id.clone(),
                user_id: self.client_id.clone(),
                record_type: record_type.to_string(),
                created: now,
                last_modified: now,
            },
            ciphertext,
        };
        write_json(&self.service.record_path(&record_id), &stored)?;

        state.records.insert(index, stored.meta);
        self.service.save_state(&state)?;

        debug!(record_id = %record_id, record_type, index, "record written");
        Ok(record_id)
    }

    fn read(&self, record_id: &str) -> Result<Record> {
        self.service.request("read");

        let stored = self.service.load_record(record_id)?;
        let state = self.service.load_state()?;
        if !self.can_read(&stored.meta, &state.grants) {
            return Err(RecordError::NotFound(record_id.to_string()).into());
        }

        self.open(SealedRecord {
            meta: stored.meta,
            ciphertext: Some(stored.ciphertext),
        })
    }

    fn delete(&self, record_id: &str) -> Result<()> {
        self.service.request("delete");

        let stored = self.service.load_record(record_id)?;
        if stored.meta.writer_id != self.client_id {
            return Err(RecordError::NotFound(record_id.to_string()).into());
        }

        let mut state = self.service.load_state()?;
        if let Some(index) = state.index_of(record_id) {
            state.records.remove(&index);
            self.service.save_state(&state)?;
        }

        fs::remove_file(self.service.record_path(record_id))?;
        debug!(record_id, "record deleted");
        Ok(())
    }

    fn query(&self, filter: &QueryFilter, after_index: u64, limit: usize) -> Result<Page> {
        self.service.request("query");

        let state = self.service.load_state()?;
        let matching: Vec<(u64, &RecordMeta)> = state
            .records
            .range((Bound::Excluded(after_index), Bound::Unbounded))
            .filter(|(_, meta)| self.can_read(meta, &state.grants) && filter.matches(meta))
            .take(limit)
            .map(|(index, meta)| (*index, meta))
            .collect();

        let last_index = matching.last().map_or(after_index, |(index, _)| *index);
        trace!(after_index, limit, count = matching.len(), last_index, "query served");

        let mut records = Vec::with_capacity(matching.len());
        for (_, meta) in matching {
            let ciphertext = if filter.include_data {
                Some(self.service.load_record(&meta.record_id)?.ciphertext)
            } else {
                None
            };
            records.push(SealedRecord {
                meta: meta.clone(),
                ciphertext,
            });
        }

        Ok(Page {
            records,
            last_index,
        })
    }

    fn open(&self, sealed: SealedRecord) -> Result<Record> {
        let data = match &sealed.ciphertext {
            Some(ciphertext) => self.decrypt_data(&sealed.meta.record_id, ciphertext)?,
            None => Data::new(),
        };
        Ok(Record {
            meta: sealed.meta,
            data,
        })
    }

    fn share(&self, record_type: &str, reader_id: &ClientId) -> Result<()> {
        self.service.request("share");
        self.set_grant(record_type, reader_id, true)
    }

    fn unshare(&self, record_type: &str, reader_id: &ClientId) -> Result<()> {
        self.service.request("unshare");
        self.set_grant(record_type, reader_id, false)
    }
}

fn hash_secret(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}

/// IDs become file names; anything but `[A-Za-z0-9_-]` is replaced.
fn safe_name(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&contents).map(Some).map_err(|e| {
        ServiceError::Corrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Write via a temporary file and rename, so readers never see half a file.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
