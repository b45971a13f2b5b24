//! Public information about a registered client.

use serde::{Deserialize, Serialize};

use crate::core::types::{ClientId, PublicKey};

/// Publicly visible identity of a client, as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub client_id: ClientId,
    pub public_key: PublicKey,
}
