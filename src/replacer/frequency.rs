//! Frequency-based replacement policies: LFU and MFU.
//!
//! Both keep one reference counter per resident page. A counter starts at 1
//! when the page is loaded, grows on every hit, and is discarded with the
//! page on eviction. They differ only in which end of the count they evict.

use std::cmp::Reverse;

use crate::common::{FrameId, PageId};
use crate::memory::FrameTable;
use crate::replacer::{PolicyKind, Replacer};

/// Per-frame reference counters shared by LFU and MFU.
#[derive(Debug, Clone)]
struct FrequencyTable {
    frames: FrameTable,

    /// `counts[slot]` is the reference count of the page in `slot`.
    counts: Vec<u32>,
}

impl FrequencyTable {
    fn new(frames: usize) -> Self {
        Self {
            frames: FrameTable::new(frames),
            counts: vec![0; frames],
        }
    }

    fn hit(&mut self, slot: FrameId) {
        self.counts[slot.0] += 1;
    }

    fn load(&mut self, slot: FrameId) {
        self.counts[slot.0] = 1;
    }

    fn count(&self, slot: FrameId) -> u32 {
        self.counts[slot.0]
    }

    /// Occupied frame with the smallest `key`; the oldest load wins ties.
    fn min_by<K: Ord>(&self, key: impl Fn(u32) -> K) -> FrameId {
        self.frames
            .occupied()
            .min_by_key(|&(slot, frame)| (key(self.counts[slot.0]), frame.loaded_at()))
            .map(|(slot, _)| slot)
            .expect("victim requested from an empty frame table")
    }
}

/// Evicts the page with the fewest references.
#[derive(Debug, Clone)]
pub struct LfuReplacer {
    table: FrequencyTable,
}

impl LfuReplacer {
    /// Create an LFU replacer over `frames` empty frames.
    pub fn new(frames: usize) -> Self {
        Self {
            table: FrequencyTable::new(frames),
        }
    }

    /// Reference count of the page in `slot`.
    pub fn count(&self, slot: FrameId) -> u32 {
        self.table.count(slot)
    }
}

impl Replacer for LfuReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    fn frames(&self) -> &FrameTable {
        &self.table.frames
    }

    fn frames_mut(&mut self) -> &mut FrameTable {
        &mut self.table.frames
    }

    fn record_hit(&mut self, slot: FrameId) {
        self.table.hit(slot);
    }

    fn record_load(&mut self, slot: FrameId, _evicted: Option<PageId>) {
        self.table.load(slot);
    }

    fn victim(&mut self, _step: usize) -> FrameId {
        self.table.min_by(|count| count)
    }
}

/// Evicts the page with the most references.
#[derive(Debug, Clone)]
pub struct MfuReplacer {
    table: FrequencyTable,
}

impl MfuReplacer {
    /// Create an MFU replacer over `frames` empty frames.
    pub fn new(frames: usize) -> Self {
        Self {
            table: FrequencyTable::new(frames),
        }
    }

    /// Reference count of the page in `slot`.
    pub fn count(&self, slot: FrameId) -> u32 {
        self.table.count(slot)
    }
}

impl Replacer for MfuReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Mfu
    }

    fn frames(&self) -> &FrameTable {
        &self.table.frames
    }

    fn frames_mut(&mut self) -> &mut FrameTable {
        &mut self.table.frames
    }

    fn record_hit(&mut self, slot: FrameId) {
        self.table.hit(slot);
    }

    fn record_load(&mut self, slot: FrameId, _evicted: Option<PageId>) {
        self.table.load(slot);
    }

    fn victim(&mut self, _step: usize) -> FrameId {
        self.table.min_by(Reverse)
    }
}
