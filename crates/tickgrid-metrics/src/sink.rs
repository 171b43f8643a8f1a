//! Snapshot sinks.

use std::io::Write;

use tracing::warn;

use crate::error::SinkResult;
use crate::snapshot::{RunSummary, TickSnapshot};

/// Destination for per-tick snapshots and the final summary.
pub trait SnapshotSink {
    /// Record the state at the end of a tick.
    fn record(&mut self, snapshot: &TickSnapshot) -> SinkResult<()>;

    /// Record the end-of-run summary.
    fn finish(&mut self, _summary: &RunSummary) -> SinkResult<()> {
        Ok(())
    }
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for Box<S> {
    fn record(&mut self, snapshot: &TickSnapshot) -> SinkResult<()> {
        (**self).record(snapshot)
    }

    fn finish(&mut self, summary: &RunSummary) -> SinkResult<()> {
        (**self).finish(summary)
    }
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    fn record(&mut self, snapshot: &TickSnapshot) -> SinkResult<()> {
        (**self).record(snapshot)
    }

    fn finish(&mut self, summary: &RunSummary) -> SinkResult<()> {
        (**self).finish(summary)
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub snapshots: Vec<TickSnapshot>,
    pub summary: Option<RunSummary>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&TickSnapshot> {
        self.snapshots.last()
    }
}

impl SnapshotSink for MemorySink {
    fn record(&mut self, snapshot: &TickSnapshot) -> SinkResult<()> {
        self.snapshots.push(*snapshot);
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> SinkResult<()> {
        self.summary = Some(*summary);
        Ok(())
    }
}

/// Writes each record as one line of JSON.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn record(&mut self, snapshot: &TickSnapshot) -> SinkResult<()> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> SinkResult<()> {
        serde_json::to_writer(&mut self.writer, summary)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Forwards every record to each inner sink.
///
/// A failing sink does not stop the others from receiving the record. The
/// first error is returned once all have been tried and is left for the
/// caller to report. Later failures in the same call are logged here.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn SnapshotSink + Send>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: impl SnapshotSink + Send + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn with(mut self, sink: impl SnapshotSink + Send + 'static) -> Self {
        self.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each(
        &mut self,
        mut f: impl FnMut(&mut Box<dyn SnapshotSink + Send>) -> SinkResult<()>,
    ) -> SinkResult<()> {
        let mut first_err = None;
        for (index, sink) in self.sinks.iter_mut().enumerate() {
            if let Err(e) = f(sink) {
                if first_err.is_none() {
                    first_err = Some(e);
                } else {
                    warn!(sink = index, error = %e, "sink write failed");
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl SnapshotSink for FanoutSink {
    fn record(&mut self, snapshot: &TickSnapshot) -> SinkResult<()> {
        self.each(|s| s.record(snapshot))
    }

    fn finish(&mut self, summary: &RunSummary) -> SinkResult<()> {
        self.each(|s| s.finish(summary))
    }
}
