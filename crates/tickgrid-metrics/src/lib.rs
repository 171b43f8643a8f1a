//! tickgrid-metrics — state snapshots and the sinks that record them.
//!
//! The scheduler emits one [`TickSnapshot`] per tick and a [`RunSummary`]
//! when the run ends. Sinks are best-effort: a failed write is reported
//! to the caller, which logs it and carries on.

pub mod csv;
pub mod error;
pub mod sink;
pub mod snapshot;

pub use csv::CsvLogSink;
pub use error::{SinkError, SinkResult};
pub use sink::{FanoutSink, JsonLinesSink, MemorySink, SnapshotSink};
pub use snapshot::{RunSummary, TickSnapshot};
