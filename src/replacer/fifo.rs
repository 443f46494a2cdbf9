//! FIFO (First-In-First-Out) replacement policy.

use std::collections::VecDeque;

use crate::common::{FrameId, PageId};
use crate::memory::FrameTable;
use crate::replacer::{PolicyKind, Replacer};

/// Evicts pages in the order they were loaded. Hits do not reorder.
#[derive(Debug, Clone)]
pub struct FifoReplacer {
    frames: FrameTable,

    /// Occupied frames in load order (front = oldest).
    queue: VecDeque<FrameId>,
}

impl FifoReplacer {
    /// Create a FIFO replacer over `frames` empty frames.
    pub fn new(frames: usize) -> Self {
        Self {
            frames: FrameTable::new(frames),
            queue: VecDeque::with_capacity(frames),
        }
    }
}

impl Replacer for FifoReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn frames(&self) -> &FrameTable {
        &self.frames
    }

    fn frames_mut(&mut self) -> &mut FrameTable {
        &mut self.frames
    }

    fn record_hit(&mut self, _slot: FrameId) {}

    fn record_load(&mut self, slot: FrameId, _evicted: Option<PageId>) {
        self.queue.push_back(slot);
    }

    fn victim(&mut self, _step: usize) -> FrameId {
        self.queue
            .pop_front()
            .expect("full frame table has a queued frame")
    }
}
