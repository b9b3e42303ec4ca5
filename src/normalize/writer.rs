use crate::normalize::types::Record;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes records as JSON Lines, one record per line
pub struct RecordWriter<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        RecordWriter { writer, written: 0 }
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).context("Failed to serialize record")?;
        self.writer.write_all(b"\n").context("Failed to write record")?;
        self.written += 1;
        Ok(())
    }

    /// Drain a record stream into the writer, stopping at the first error
    pub fn write_all<I>(&mut self, records: I) -> Result<u64>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let before = self.written;
        for record in records {
            self.write_record(&record?)?;
        }
        Ok(self.written - before)
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
