//! Read command - print records as JSON objects.

use std::io;

use crate::cli::{session, Options};
use crate::core::render;
use crate::error::Result;

/// Fetch each record and pretty-print it, stopping at the first failure.
pub fn execute(opts: &Options, record_ids: &[String]) -> Result<()> {
    let client = session::connect(opts)?;
    let stdout = io::stdout();

    for record_id in record_ids {
        let record = client.read(record_id)?;
        render::render_record(&record, stdout.lock())?;
    }

    Ok(())
}
