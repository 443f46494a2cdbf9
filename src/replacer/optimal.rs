//! Optimal (Belady) replacement policy.
//!
//! Not an online policy: it reads ahead in the reference string to evict the
//! page whose next request is farthest away. It gives the lower bound on
//! faults the other policies are measured against.

use std::cmp::Reverse;

use crate::common::{FrameId, PageId};
use crate::memory::FrameTable;
use crate::reference::ReferenceString;
use crate::replacer::{PolicyKind, Replacer};

/// Evicts the page that will not be needed for the longest time.
#[derive(Debug, Clone)]
pub struct OptimalReplacer {
    frames: FrameTable,
    reference: ReferenceString,
}

impl OptimalReplacer {
    /// Create an Optimal replacer over `frames` empty frames that will be fed
    /// `reference`.
    pub fn new(frames: usize, reference: ReferenceString) -> Self {
        Self {
            frames: FrameTable::new(frames),
            reference,
        }
    }
}

impl Replacer for OptimalReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Optimal
    }

    fn frames(&self) -> &FrameTable {
        &self.frames
    }

    fn frames_mut(&mut self) -> &mut FrameTable {
        &mut self.frames
    }

    fn record_hit(&mut self, _slot: FrameId) {}

    fn record_load(&mut self, _slot: FrameId, _evicted: Option<PageId>) {}

    fn victim(&mut self, step: usize) -> FrameId {
        // Never used again counts as infinitely far; oldest load wins ties.
        self.frames
            .occupied()
            .filter_map(|(slot, frame)| Some((slot, frame.page_id()?, frame.loaded_at())))
            .min_by_key(|&(_, page_id, loaded_at)| {
                let next_use = self.reference.next_use(page_id, step).unwrap_or(usize::MAX);
                (Reverse(next_use), loaded_at)
            })
            .map(|(slot, _, _)| slot)
            .expect("victim requested from an empty frame table")
    }
}
