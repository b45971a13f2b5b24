//! Streaming record output.
//!
//! Records are written as they arrive, so listings of any size run in
//! constant memory. JSON output stays a valid array even though the element
//! count is unknown until the stream ends.

use std::io::Write;

use crate::core::constants::RECORD_ID_WIDTH;
use crate::core::domain::Record;
use crate::error::Result;

/// Listing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `<record id padded to 40> <type>` per line
    #[default]
    Plain,
    /// A JSON array of records
    Json,
}

impl Format {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Format::Json
        } else {
            Format::Plain
        }
    }
}

/// Incremental renderer for a record stream.
pub struct StreamRenderer<W: Write> {
    sink: W,
    format: Format,
    count: usize,
}

impl<W: Write> StreamRenderer<W> {
    pub fn new(sink: W, format: Format) -> Self {
        Self {
            sink,
            format,
            count: 0,
        }
    }

    /// Write one record.
    pub fn push(&mut self, record: &Record) -> Result<()> {
        match self.format {
            Format::Plain => {
                writeln!(
                    self.sink,
                    "{:<width$} {}",
                    record.id(),
                    record.record_type(),
                    width = RECORD_ID_WIDTH
                )?;
            }
            Format::Json => {
                let separator = if self.count == 0 { "[\n" } else { ",\n" };
                let pretty = serde_json::to_string_pretty(record)?;
                write!(self.sink, "{}  {}", separator, pretty.replace('\n', "\n  "))?;
            }
        }
        self.count += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Close the output (the JSON array) and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        if self.format == Format::Json {
            if self.count == 0 {
                self.sink.write_all(b"[\n]\n")?;
            } else {
                self.sink.write_all(b"\n]\n")?;
            }
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Render a record stream, stopping at the first failed element.
///
/// Returns the number of records written. On error the output is left as
/// is; a JSON array will be unterminated.
pub fn render<I, W>(records: I, format: Format, sink: W) -> Result<usize>
where
    I: IntoIterator<Item = Result<Record>>,
    W: Write,
{
    let mut renderer = StreamRenderer::new(sink, format);
    for record in records {
        renderer.push(&record?)?;
    }
    let count = renderer.count();
    renderer.finish()?;
    Ok(count)
}

/// Render a single record as a standalone pretty-printed JSON object.
pub fn render_record<W: Write>(record: &Record, mut sink: W) -> Result<()> {
    let pretty = serde_json::to_string_pretty(record)?;
    writeln!(sink, "{}", pretty)?;
    Ok(())
}
