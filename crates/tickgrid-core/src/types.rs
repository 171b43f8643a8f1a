//! Shared types used across TickGrid crates.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// Simulated time, counted in whole ticks.
pub type Tick = u64;

/// The kind of work a job represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// Short-lived streaming request.
    Streaming,
    /// Longer batch-processing request.
    Batch,
}

impl JobKind {
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::Streaming => "streaming",
            JobKind::Batch => "batch",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of work entering the scheduler.
///
/// Jobs are immutable once created. They are moved from the queue into a
/// worker and dropped when the worker finishes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JobRecord")]
pub struct Job {
    origin: Ipv4Addr,
    destination: Ipv4Addr,
    kind: JobKind,
    service_ticks: Tick,
    created_at: Tick,
}

/// Wire form of a [`Job`]. Decoding goes through [`Job::new`] so the
/// service-time clamp applies.
#[derive(Deserialize)]
struct JobRecord {
    origin: Ipv4Addr,
    destination: Ipv4Addr,
    kind: JobKind,
    service_ticks: Tick,
    created_at: Tick,
}

impl From<JobRecord> for Job {
    fn from(r: JobRecord) -> Self {
        Job::new(r.origin, r.destination, r.kind, r.service_ticks, r.created_at)
    }
}

impl Job {
    /// Build a job. `service_ticks` is clamped to at least one tick so a
    /// busy worker always has work remaining.
    pub fn new(
        origin: Ipv4Addr,
        destination: Ipv4Addr,
        kind: JobKind,
        service_ticks: Tick,
        created_at: Tick,
    ) -> Self {
        Self {
            origin,
            destination,
            kind,
            service_ticks: service_ticks.max(1),
            created_at,
        }
    }

    pub fn origin(&self) -> Ipv4Addr {
        self.origin
    }

    pub fn destination(&self) -> Ipv4Addr {
        self.destination
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    /// Ticks of work this job needs from a worker.
    pub fn service_ticks(&self) -> Tick {
        self.service_ticks
    }

    /// Tick at which the job was generated. Prefilled jobs carry tick 0.
    pub fn created_at(&self) -> Tick {
        self.created_at
    }

    /// First octet of the origin address, used by admission filtering.
    pub fn origin_prefix(&self) -> u8 {
        self.origin.octets()[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(service_ticks: Tick) -> Job {
        Job::new(
            Ipv4Addr::new(195, 1, 2, 3),
            Ipv4Addr::new(10, 0, 0, 1),
            JobKind::Batch,
            service_ticks,
            7,
        )
    }

    #[test]
    fn accessors_return_constructed_values() {
        let j = job(30);
        assert_eq!(j.origin().to_string(), "195.1.2.3");
        assert_eq!(j.destination().to_string(), "10.0.0.1");
        assert_eq!(j.kind(), JobKind::Batch);
        assert_eq!(j.service_ticks(), 30);
        assert_eq!(j.created_at(), 7);
        assert_eq!(j.origin_prefix(), 195);
    }

    #[test]
    fn zero_service_is_clamped_to_one_tick() {
        assert_eq!(job(0).service_ticks(), 1);
    }

    #[test]
    fn decoded_zero_service_is_clamped() {
        let json = r#"{"origin":"10.0.0.1","destination":"10.0.0.2","kind":"streaming","service_ticks":0,"created_at":4}"#;
        let j: Job = serde_json::from_str(json).unwrap();
        assert_eq!(j.service_ticks(), 1);
        assert_eq!(j.kind(), JobKind::Streaming);
        assert_eq!(j.created_at(), 4);
    }

    #[test]
    fn job_survives_json() {
        let j = job(33);
        let decoded: Job = serde_json::from_str(&serde_json::to_string(&j).unwrap()).unwrap();
        assert_eq!(decoded, j);
    }

    #[test]
    fn job_kind_serializes_lowercase() {
        let json = serde_json::to_string(&JobKind::Streaming).unwrap();
        assert_eq!(json, "\"streaming\"");
        assert_eq!(JobKind::Batch.to_string(), "batch");
    }
}
