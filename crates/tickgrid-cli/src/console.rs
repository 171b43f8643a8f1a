//! Console sink: periodic status lines and the closing summary on stdout.

use std::io::Write;

use tickgrid_metrics::{RunSummary, SinkResult, SnapshotSink, TickSnapshot};

pub struct ConsoleSink<W: Write> {
    out: W,
    /// Print a status line every this many ticks. Zero disables them.
    every: u64,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self { out, every }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SnapshotSink for ConsoleSink<W> {
    fn record(&mut self, s: &TickSnapshot) -> SinkResult<()> {
        if self.every == 0 || s.tick % self.every != 0 {
            return Ok(());
        }
        writeln!(
            self.out,
            "[Cycle {}] Servers: {}, Queue: {}, Processed: {}, Blocked: {}",
            s.tick, s.worker_count, s.queue_len, s.total_completed, s.total_rejected
        )?;
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> SinkResult<()> {
        writeln!(self.out)?;
        if summary.stopped_early {
            writeln!(self.out, "Simulation stopped after {} ticks", summary.ticks_run)?;
        } else {
            writeln!(self.out, "Simulation complete")?;
        }
        writeln!(self.out, "Initial Servers: {}", summary.initial_workers)?;
        writeln!(self.out, "Final Servers: {}", summary.final_workers)?;
        writeln!(self.out, "Requests Processed: {}", summary.total_completed)?;
        writeln!(self.out, "Blocked Requests: {}", summary.total_rejected)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(tick: u64) -> TickSnapshot {
        TickSnapshot {
            tick,
            worker_count: 2,
            busy_workers: 2,
            queue_len: 40,
            total_admitted: tick,
            total_rejected: 1,
            total_dispatched: 5,
            total_completed: 3,
        }
    }

    #[test]
    fn prints_on_cadence_only() {
        let mut sink = ConsoleSink::new(Vec::new(), 50);
        for tick in 1..=100 {
            sink.record(&snapshot(tick)).unwrap();
        }
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "[Cycle 50] Servers: 2, Queue: 40, Processed: 3, Blocked: 1\n\
             [Cycle 100] Servers: 2, Queue: 40, Processed: 3, Blocked: 1\n"
        );
    }

    #[test]
    fn zero_cadence_is_silent() {
        let mut sink = ConsoleSink::new(Vec::new(), 0);
        sink.record(&snapshot(50)).unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn early_stop_is_reported() {
        let mut sink = ConsoleSink::new(Vec::new(), 50);
        sink.finish(&RunSummary {
            initial_workers: 2,
            final_workers: 3,
            ticks_run: 17,
            total_admitted: 15,
            total_rejected: 1,
            total_dispatched: 10,
            total_completed: 4,
            stopped_early: true,
        })
        .unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("Simulation stopped after 17 ticks"));
        assert!(out.contains("Final Servers: 3"));
    }
}
