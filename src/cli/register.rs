//! Register command - create an identity and its local profile.

use tracing::info;

use crate::cli::{output, Options};
use crate::core::client::{self, RegistrationOptions};
use crate::core::profile::{self, ProfileStore};
use crate::core::validation;
use crate::error::Result;

/// Register a new client and save it as the selected profile.
///
/// The profile name is checked before anything is sent to the service.
pub fn execute(
    opts: &Options,
    email: &str,
    api: Option<String>,
    auth: Option<String>,
    public: bool,
) -> Result<()> {
    validation::validate_email(email)?;

    let store = ProfileStore::open_default()?;
    let registration = RegistrationOptions {
        api_url: api.unwrap_or_else(|| store.default_service_url()),
        auth_url: auth,
        find_by_email: public,
        logging: opts.debug,
    };

    info!(email, profile = %profile::display_name(&opts.profile), "registering client");
    let created = store.create_with(&opts.profile, || client::register(email, &registration))?;

    output::success(&format!("registered {}", email));
    output::field("Client ID", &created.client_id);
    output::field("Profile", output::path(&store.path(&opts.profile).display().to_string()));

    Ok(())
}
