//! Per-policy fault statistics.

use std::fmt;

use crate::replacer::Outcome;

/// Hit/fault counters for one policy over one run.
///
/// # Example
/// ```
/// use pagesim::{FrameId, Outcome, PolicyStats};
///
/// let mut stats = PolicyStats::new();
/// stats.record(&Outcome::InsertedFree { slot: FrameId::new(0) });
/// stats.record(&Outcome::Hit { slot: FrameId::new(0) });
/// assert_eq!(stats.hit_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyStats {
    /// Requests for pages that were already resident.
    pub hits: u64,

    /// Requests for pages that were not resident.
    pub faults: u64,

    /// Faults that had to evict a resident page.
    pub evictions: u64,
}

impl PolicyStats {
    /// Create a tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Hit { .. } => self.hits += 1,
            Outcome::InsertedFree { .. } => self.faults += 1,
            Outcome::Replaced { .. } => {
                self.faults += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total requests served.
    pub fn requests(&self) -> u64 {
        self.hits + self.faults
    }

    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for PolicyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits: {}, faults: {}, evictions: {}, hit_rate: {:.2}%",
            self.hits,
            self.faults,
            self.evictions,
            self.hit_rate() * 100.0
        )
    }
}
