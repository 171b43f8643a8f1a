//! Admission filter. Rejects arrivals from a blocked origin range.

use tickgrid_core::{Job, OriginRange};

#[derive(Debug, Clone, Copy)]
pub struct AdmissionFilter {
    blocked: OriginRange,
}

impl AdmissionFilter {
    pub fn new(blocked: OriginRange) -> Self {
        Self { blocked }
    }

    /// True if the first octet of the job's origin is in the blocked range.
    pub fn is_rejected(&self, job: &Job) -> bool {
        self.blocked.contains(job.origin_prefix())
    }
}
