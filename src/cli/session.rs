//! Profile loading and client construction shared by commands.

use tracing::debug;

use crate::cli::Options;
use crate::core::client::{self, Client};
use crate::core::profile::{Profile, ProfileStore};
use crate::error::Result;

/// Load the selected profile.
pub fn profile(opts: &Options) -> Result<(ProfileStore, Profile)> {
    let store = ProfileStore::open_default()?;
    let profile = store.load(&opts.profile)?;
    Ok((store, profile))
}

/// Connect a client acting as the selected profile.
///
/// # Errors
///
/// Returns `ProfileError::NotFound` if the profile does not exist, or the
/// client's error if the service rejects the credentials.
pub fn connect(opts: &Options) -> Result<Box<dyn Client>> {
    let (store, profile) = profile(opts)?;
    let client = client::connect(&profile, &store.default_service_url(), opts.debug)?;
    debug!(client_id = %client.client_id(), "client ready");
    Ok(client)
}
