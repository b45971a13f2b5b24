//! Write command - store a new record.

use tracing::debug;

use crate::cli::{output, session, Options};
use crate::core::validation;
use crate::error::Result;

/// Write a record of `record_type` from a JSON object and print its ID.
pub fn execute(opts: &Options, record_type: &str, data: &str) -> Result<()> {
    validation::require("record type", record_type)?;
    let data = validation::parse_data(data)?;

    let client = session::connect(opts)?;
    let record_id = client.write(record_type, data)?;

    debug!(record_id = %record_id, record_type, "record written");
    output::data(record_id);
    Ok(())
}
