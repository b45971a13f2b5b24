//! Info command - show own credentials or another client's public info.

use crate::cli::{output, session, Options};
use crate::error::Result;

/// Print client information.
///
/// Without an argument, prints the selected profile's credentials. With a
/// client ID or email, looks that client up.
pub fn execute(opts: &Options, client_id: Option<&str>) -> Result<()> {
    match client_id {
        None => {
            let (_, profile) = session::profile(opts)?;
            output::field("Client ID", &profile.client_id);
            output::field("Public Key", &profile.public_key);
            output::field("API Key ID", &profile.api_key_id);
            output::field("API Secret", &profile.api_secret);
        }
        Some(id) => {
            let client = session::connect(opts)?;
            let info = client.client_info(id)?;
            output::field("Client ID", &info.client_id);
            output::field("Public Key", &info.public_key);
        }
    }

    Ok(())
}
