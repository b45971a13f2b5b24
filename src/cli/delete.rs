//! Delete command - remove records.

use tracing::info;

use crate::cli::{session, Options};
use crate::error::Result;

/// Delete each record in turn, stopping at the first failure.
pub fn execute(opts: &Options, record_ids: &[String]) -> Result<()> {
    let client = session::connect(opts)?;

    for record_id in record_ids {
        client.delete(record_id)?;
        info!(record_id = %record_id, "deleted");
    }

    Ok(())
}
