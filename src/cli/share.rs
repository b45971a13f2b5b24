//! Share and unshare commands.

use crate::cli::{output, session, Options};
use crate::core::identifier::Identifier;
use crate::core::share::{grant, revoke};
use crate::error::Result;

/// Grant `client_id` read access to records of `record_type`.
///
/// The confirmation names the resolved client ID, even when an email was given.
pub fn share(opts: &Options, record_type: &str, client_id: &str) -> Result<()> {
    let client = session::connect(opts)?;
    let reader_id = grant(client.as_ref(), record_type, &Identifier::parse(client_id))?;

    output::data(format!(
        "Records of type '{}' are now shared with client '{}'",
        record_type, reader_id
    ));
    Ok(())
}

/// Revoke `client_id`'s read access to records of `record_type`.
pub fn unshare(opts: &Options, record_type: &str, client_id: &str) -> Result<()> {
    let client = session::connect(opts)?;
    let reader_id = revoke(client.as_ref(), record_type, &Identifier::parse(client_id))?;

    output::data(format!(
        "Records of type '{}' are no longer shared with client '{}'",
        record_type, reader_id
    ));
    Ok(())
}
