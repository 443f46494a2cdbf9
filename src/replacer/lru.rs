//! LRU (Least Recently Used) replacement policy.

use std::collections::VecDeque;

use crate::common::{FrameId, PageId};
use crate::memory::FrameTable;
use crate::replacer::{PolicyKind, Replacer};

/// Evicts the page whose last request is the oldest.
#[derive(Debug, Clone)]
pub struct LruReplacer {
    frames: FrameTable,

    /// Occupied frames by recency (front = least recently used).
    recency: VecDeque<FrameId>,
}

impl LruReplacer {
    /// Create an LRU replacer over `frames` empty frames.
    pub fn new(frames: usize) -> Self {
        Self {
            frames: FrameTable::new(frames),
            recency: VecDeque::with_capacity(frames),
        }
    }

    /// Move `slot` to the most-recently-used end.
    fn touch(&mut self, slot: FrameId) {
        if let Some(pos) = self.recency.iter().position(|&fid| fid == slot) {
            self.recency.remove(pos);
        }
        self.recency.push_back(slot);
    }
}

impl Replacer for LruReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn frames(&self) -> &FrameTable {
        &self.frames
    }

    fn frames_mut(&mut self) -> &mut FrameTable {
        &mut self.frames
    }

    fn record_hit(&mut self, slot: FrameId) {
        self.touch(slot);
    }

    fn record_load(&mut self, slot: FrameId, _evicted: Option<PageId>) {
        self.touch(slot);
    }

    fn victim(&mut self, _step: usize) -> FrameId {
        self.recency
            .pop_front()
            .expect("full frame table has a recency entry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: i32) -> PageId {
        PageId::new(id)
    }

    #[test]
    fn test_lru_hit_refreshes_recency() {
        // [1, 2, 3, 1, 4] with 3 frames: 1 was reused, so 2 goes.
        let mut replacer = LruReplacer::new(3);
        replacer.insert(p(1), 0);
        replacer.insert(p(2), 1);
        replacer.insert(p(3), 2);
        assert!(replacer.insert(p(1), 3).is_hit());

        assert_eq!(replacer.insert(p(4), 4).evicted(), Some(p(2)));
        assert_eq!(replacer.frames().find(p(4)), Some(FrameId::new(1)));
    }

    #[test]
    fn test_lru_without_hits_matches_fifo() {
        let mut replacer = LruReplacer::new(2);
        replacer.insert(p(1), 0);
        replacer.insert(p(2), 1);

        assert_eq!(replacer.insert(p(3), 2).evicted(), Some(p(1)));
        assert_eq!(replacer.insert(p(4), 3).evicted(), Some(p(2)));
    }

    #[test]
    fn test_lru_repeated_hits_keep_page() {
        let mut replacer = LruReplacer::new(2);
        for (step, id) in [1, 2, 1, 3, 1, 4, 1].into_iter().enumerate() {
            replacer.insert(p(id), step);
        }
        assert!(replacer.frames().find(p(1)).is_some());
        assert!(replacer.frames().find(p(4)).is_some());
    }
}
