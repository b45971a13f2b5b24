//! Record sharing.
//!
//! Grants and revocations apply to every record of one type written by the
//! acting client. Both are idempotent; nothing here checks the current grant
//! state before delegating to the client.

use tracing::debug;

use crate::core::client::Client;
use crate::core::identifier::{self, Identifier};
use crate::core::types::ClientId;
use crate::core::validation;
use crate::error::Result;

/// Let `counterparty` read all records of `record_type`.
///
/// Returns the resolved client ID of the counterparty.
///
/// # Errors
///
/// Returns `ValidationError::Empty` for an empty type or counterparty,
/// `ResolveError` if an email cannot be resolved, or the client's error.
pub fn grant(client: &dyn Client, record_type: &str, counterparty: &Identifier) -> Result<ClientId> {
    let reader_id = prepare(client, record_type, counterparty)?;
    debug!(record_type, reader_id = %reader_id, "granting access");
    client.share(record_type, &reader_id)?;
    Ok(reader_id)
}

/// Stop `counterparty` from reading records of `record_type`.
///
/// Returns the resolved client ID of the counterparty.
///
/// # Errors
///
/// Same as [`grant`].
pub fn revoke(client: &dyn Client, record_type: &str, counterparty: &Identifier) -> Result<ClientId> {
    let reader_id = prepare(client, record_type, counterparty)?;
    debug!(record_type, reader_id = %reader_id, "revoking access");
    client.unshare(record_type, &reader_id)?;
    Ok(reader_id)
}

fn prepare(client: &dyn Client, record_type: &str, counterparty: &Identifier) -> Result<ClientId> {
    validation::require("record type", record_type)?;
    validation::require("client id", &counterparty.to_string())?;
    identifier::resolve_one(counterparty, |email| client.client_info(email))
}
