//! Named credential profiles.
//!
//! A profile is the credential bundle a command acts as. Profiles are created
//! exactly once, at registration, and loaded read-only afterwards:
//!
//! ```text
//! ~/.e3db/
//! ├── config.toml          # default profile (empty name)
//! └── profiles/
//!     └── work.toml        # profile "work"
//! ```

use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::core::constants;
use crate::core::types::{ClientId, PublicKey};
use crate::core::validation;
use crate::error::{ProfileError, Result};

/// Credentials for one registered client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile format version
    pub version: u32,
    pub client_id: ClientId,
    pub client_email: String,
    /// age public key (`age1...`)
    pub public_key: PublicKey,
    /// age secret key (`AGE-SECRET-KEY-1...`)
    pub private_key: String,
    pub api_key_id: String,
    pub api_secret: String,
    /// Record-store service base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Auth service base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("version", &self.version)
            .field("client_id", &self.client_id)
            .field("client_email", &self.client_email)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("api_key_id", &self.api_key_id)
            .field("api_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

impl Drop for Profile {
    fn drop(&mut self) {
        self.private_key.zeroize();
        self.api_secret.zeroize();
    }
}

/// Human-readable profile name; the empty name is the default profile.
pub fn display_name(name: &str) -> String {
    if name.is_empty() {
        "(default)".to_string()
    } else {
        name.to_string()
    }
}

/// On-disk profile store rooted at a configuration directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    /// Store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store at `$E3DB_CONFIG_DIR`, or `~/.e3db` when unset.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoHome` if the home directory cannot be found.
    pub fn open_default() -> Result<Self> {
        if let Some(dir) = std::env::var_os(constants::CONFIG_DIR_ENV) {
            return Ok(Self::new(dir));
        }
        let home = dirs::home_dir().ok_or(ProfileError::NoHome)?;
        Ok(Self::new(home.join(constants::CONFIG_DIR)))
    }

    /// Configuration directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Base URL of the local service used when a profile names none.
    pub fn default_service_url(&self) -> String {
        format!(
            "{}{}",
            constants::FILE_SCHEME,
            self.root.join(constants::SERVICE_DIR).display()
        )
    }

    /// Path of the file backing profile `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        if name.is_empty() {
            self.root.join(constants::DEFAULT_PROFILE_FILE)
        } else {
            self.root
                .join(constants::PROFILES_DIR)
                .join(format!("{}.toml", name))
        }
    }

    /// Check whether profile `name` exists.
    ///
    /// Invalid names never exist.
    pub fn exists(&self, name: &str) -> bool {
        validation::validate_profile_name(name).is_ok() && self.path(name).exists()
    }

    /// Create profile `name`, failing if it already exists.
    ///
    /// The file is opened with `create_new`, so an existing profile is never
    /// overwritten, even when another process created it after an `exists`
    /// probe.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Conflict` if the profile exists,
    /// `ValidationError::InvalidProfileName` for a bad name, or a write error.
    pub fn create(&self, name: &str, profile: &Profile) -> Result<()> {
        validation::validate_profile_name(name)?;

        let path = self.path(name);
        debug!(path = %path.display(), "creating profile");

        let write_err = |source: std::io::Error| ProfileError::Write {
            name: display_name(name),
            source,
        };

        let contents = toml::to_string_pretty(profile).map_err(ProfileError::Serialize)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut file = match open_exclusive(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(ProfileError::Conflict(display_name(name)).into());
            }
            Err(e) => return Err(write_err(e).into()),
        };

        if let Err(e) = file.write_all(contents.as_bytes()).and_then(|_| file.sync_all()) {
            // The half-written file would block every later create
            let _ = fs::remove_file(&path);
            return Err(write_err(e).into());
        }

        debug!(path = %path.display(), "profile saved");
        Ok(())
    }

    /// Register a new identity and store it as profile `name`.
    ///
    /// `register` performs the remote registration. It only runs after the
    /// profile name has been checked to be free, so a name collision never
    /// leaves an orphaned registration behind.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Conflict` without calling `register` if the
    /// profile exists, or any error from `register` or [`ProfileStore::create`].
    pub fn create_with<F>(&self, name: &str, register: F) -> Result<Profile>
    where
        F: FnOnce() -> Result<Profile>,
    {
        validation::validate_profile_name(name)?;

        if self.exists(name) {
            return Err(ProfileError::Conflict(display_name(name)).into());
        }

        let profile = register()?;
        self.create(name, &profile)?;
        Ok(profile)
    }

    /// Load profile `name`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if the profile does not exist, or
    /// `ProfileError::Parse` if the file is malformed.
    pub fn load(&self, name: &str) -> Result<Profile> {
        validation::validate_profile_name(name)?;

        let path = self.path(name);
        debug!(path = %path.display(), "loading profile");

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProfileError::NotFound(display_name(name)).into());
            }
            Err(source) => {
                return Err(ProfileError::Read {
                    name: display_name(name),
                    source,
                }
                .into());
            }
        };

        #[cfg(unix)]
        if let Some(mode) = validation::loose_permissions(&path, 0o600) {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure profile file permissions"
            );
        }

        let profile: Profile = toml::from_str(&contents).map_err(|source| ProfileError::Parse {
            name: display_name(name),
            source,
        })?;

        debug!(client_id = %profile.client_id, "profile loaded");
        Ok(profile)
    }
}

#[cfg(unix)]
fn open_exclusive(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_exclusive(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
}
