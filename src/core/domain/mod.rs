//! Domain types.

mod client_info;
mod record;

pub use client_info::ClientInfo;
pub use record::{Record, RecordMeta};
