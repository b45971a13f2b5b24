//! Client identifier resolution.
//!
//! Commands accept either canonical client IDs or email addresses. Emails are
//! turned into IDs with one lookup each; IDs pass through untouched.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::core::domain::ClientInfo;
use crate::core::types::ClientId;
use crate::error::{ResolveError, Result};

/// A user-supplied client identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Already a canonical client ID
    Canonical(ClientId),
    /// An email address that needs a lookup
    Email(String),
}

impl Identifier {
    /// Classify a raw argument. Anything containing `@` is an email address.
    pub fn parse(raw: &str) -> Self {
        if raw.contains('@') {
            Identifier::Email(raw.to_string())
        } else {
            Identifier::Canonical(raw.to_string())
        }
    }

    /// Whether resolving this identifier needs a lookup.
    pub fn is_email(&self) -> bool {
        matches!(self, Identifier::Email(_))
    }
}

impl FromStr for Identifier {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Canonical(id) => f.write_str(id),
            Identifier::Email(email) => f.write_str(email),
        }
    }
}

/// Resolve identifiers to canonical client IDs.
///
/// Output order and length match the input. Each email triggers exactly one
/// `lookup` call; canonical IDs trigger none. The first failed lookup aborts
/// the whole resolution, and identifiers after it are never looked up.
///
/// # Errors
///
/// Returns `ResolveError::Lookup` wrapping the lookup failure.
pub fn resolve<F>(identifiers: &[Identifier], mut lookup: F) -> Result<Vec<ClientId>>
where
    F: FnMut(&str) -> Result<ClientInfo>,
{
    identifiers
        .iter()
        .map(|identifier| match identifier {
            Identifier::Canonical(id) => Ok(id.clone()),
            Identifier::Email(email) => {
                debug!(email = %email, "looking up client by email");
                let info = lookup(email).map_err(|source| ResolveError::Lookup {
                    email: email.clone(),
                    source: Box::new(source),
                })?;
                debug!(email = %email, client_id = %info.client_id, "resolved");
                Ok(info.client_id)
            }
        })
        .collect()
}

/// Resolve a single identifier.
///
/// # Errors
///
/// Returns `ResolveError::Lookup` if the email lookup fails.
pub fn resolve_one<F>(identifier: &Identifier, lookup: F) -> Result<ClientId>
where
    F: FnMut(&str) -> Result<ClientInfo>,
{
    let mut ids = resolve(std::slice::from_ref(identifier), lookup)?;
    Ok(ids.remove(0))
}
