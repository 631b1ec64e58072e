use crate::rows::types::Row;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes rows as JSON Lines, one object per line
pub struct RowWriter<W: Write> {
    writer: W,
    rows_written: usize,
    tag_document: bool,
}

impl<W: Write> RowWriter<W> {
    pub fn new(writer: W) -> Self {
        RowWriter {
            writer,
            rows_written: 0,
            tag_document: false,
        }
    }

    /// Add a `_document` field holding the ordinal of the source document
    pub fn with_document_tag(mut self) -> Self {
        self.tag_document = true;
        self
    }

    /// Write the rows expanded from the `document`-th input
    pub fn write_rows(&mut self, document: usize, rows: &[Row]) -> Result<()> {
        for row in rows {
            let serialized = if self.tag_document {
                let mut tagged = row.clone();
                tagged.insert("_document".to_string(), serde_json::Value::from(document));
                serde_json::to_string(&tagged)
            } else {
                serde_json::to_string(row)
            };
            let json = serialized.context("Failed to serialize row")?;

            writeln!(self.writer, "{}", json).context("Failed to write row")?;
            self.rows_written += 1;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}
