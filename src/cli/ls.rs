//! List command - stream filtered records.

use std::io;

use tracing::debug;

use crate::cli::{session, Options};
use crate::core::client::Client;
use crate::core::identifier::{self, Identifier};
use crate::core::query::{Cursor, QueryFilter};
use crate::core::render::{self, Format};
use crate::error::Result;

/// Parsed `ls` flags.
#[derive(Debug, Default)]
pub struct ListArgs {
    pub data: bool,
    pub json: bool,
    pub types: Vec<String>,
    pub records: Vec<String>,
    pub writers: Vec<String>,
    pub users: Vec<String>,
}

/// List records matching the flags, rendering each as it arrives.
///
/// The listing aborts on the first record that cannot be read.
pub fn execute(opts: &Options, args: ListArgs) -> Result<()> {
    let client = session::connect(opts)?;
    let filter = build_filter(client.as_ref(), &args)?;

    let cursor = Cursor::open(client.as_ref(), filter);
    let count = render::render(cursor, Format::from_json_flag(args.json), io::stdout().lock())?;

    debug!(count, "listing complete");
    Ok(())
}

/// Build the query filter, resolving writer emails to client IDs.
pub fn build_filter(client: &dyn Client, args: &ListArgs) -> Result<QueryFilter> {
    let writers: Vec<Identifier> = args.writers.iter().map(|w| Identifier::parse(w)).collect();
    let writer_ids = identifier::resolve(&writers, |email| client.client_info(email))?;

    Ok(QueryFilter {
        content_types: args.types.iter().cloned().collect(),
        record_ids: args.records.iter().cloned().collect(),
        writer_ids: writer_ids.into_iter().collect(),
        user_ids: args.users.iter().cloned().collect(),
        include_data: args.data,
    })
}
