//! CSV log file sink.
//!
//! Writes a header, one row per tick, and a plain-text summary block. The
//! file is opened when the sink is created and flushed when it is dropped,
//! so an early exit still leaves a readable log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::SinkResult;
use crate::sink::SnapshotSink;
use crate::snapshot::{RunSummary, TickSnapshot};

pub const CSV_HEADER: &str = "Clock,Servers,QueueSize,Processed,Blocked";

pub struct CsvLogSink<W: Write = BufWriter<File>> {
    writer: W,
    path: Option<PathBuf>,
}

impl CsvLogSink {
    /// Create (or truncate) the log file at `path` and write the header.
    pub fn create(path: &Path) -> SinkResult<Self> {
        let file = File::create(path)?;
        let mut sink = Self::from_writer(BufWriter::new(file))?;
        sink.path = Some(path.to_path_buf());
        debug!(path = %path.display(), "csv log opened");
        Ok(sink)
    }
}

impl<W: Write> CsvLogSink<W> {
    /// Wrap an arbitrary writer. The header is written immediately.
    pub fn from_writer(mut writer: W) -> SinkResult<Self> {
        writeln!(writer, "{CSV_HEADER}")?;
        Ok(Self { writer, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl<W: Write> SnapshotSink for CsvLogSink<W> {
    fn record(&mut self, s: &TickSnapshot) -> SinkResult<()> {
        writeln!(
            self.writer,
            "{},{},{},{},{}",
            s.tick, s.worker_count, s.queue_len, s.total_completed, s.total_rejected
        )?;
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> SinkResult<()> {
        writeln!(self.writer, "Simulation complete")?;
        writeln!(self.writer, "Initial Servers: {}", summary.initial_workers)?;
        writeln!(self.writer, "Final Servers: {}", summary.final_workers)?;
        writeln!(self.writer, "Requests Processed: {}", summary.total_completed)?;
        writeln!(self.writer, "Blocked Requests: {}", summary.total_rejected)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for CsvLogSink<W> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!(error = %e, "failed to flush csv log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(tick: u64) -> TickSnapshot {
        TickSnapshot {
            tick,
            worker_count: 3,
            busy_workers: 2,
            queue_len: 41,
            total_admitted: 10,
            total_rejected: 2,
            total_dispatched: 9,
            total_completed: 7,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        {
            let mut sink = CsvLogSink::from_writer(&mut buf).unwrap();
            sink.record(&snapshot(1)).unwrap();
            sink.record(&snapshot(2)).unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "Clock,Servers,QueueSize,Processed,Blocked\n1,3,41,7,2\n2,3,41,7,2\n");
    }

    #[test]
    fn summary_block_follows_rows() {
        let mut buf = Vec::new();
        {
            let mut sink = CsvLogSink::from_writer(&mut buf).unwrap();
            sink.finish(&RunSummary {
                initial_workers: 2,
                final_workers: 4,
                ticks_run: 100,
                total_admitted: 80,
                total_rejected: 5,
                total_dispatched: 70,
                total_completed: 66,
                stopped_early: false,
            })
            .unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Simulation complete\n"));
        assert!(out.contains("Initial Servers: 2\n"));
        assert!(out.contains("Final Servers: 4\n"));
        assert!(out.contains("Requests Processed: 66\n"));
        assert!(out.contains("Blocked Requests: 5\n"));
    }

    #[test]
    fn file_is_flushed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickgrid.log");
        {
            let mut sink = CsvLogSink::create(&path).unwrap();
            assert_eq!(sink.path(), Some(path.as_path()));
            sink.record(&snapshot(1)).unwrap();
            // Dropped without finish(), as on an early exit.
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with(CSV_HEADER));
    }

    #[test]
    fn create_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tickgrid.log");
        assert!(CsvLogSink::create(&path).is_err());
    }
}
