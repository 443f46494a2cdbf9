//! FrameTable - the fixed set of frames one policy manages.

use crate::common::{FrameId, PageId};
use crate::memory::Frame;

/// Fixed-capacity, ordered set of frames.
///
/// The table only represents occupancy. Choosing which frame to overwrite
/// is the job of a [`Replacer`](crate::replacer::Replacer).
///
/// # Layout
/// ```text
/// ┌──────────┬──────────┬──────────┬──────────┐
/// │ Frame(0) │ Frame(1) │ Frame(2) │ Frame(3) │
/// │ page 7   │ page 0   │ page 1   │ (empty)  │
/// │ seq 0    │ seq 1    │ seq 2    │          │
/// └──────────┴──────────┴──────────┴──────────┘
/// ```
///
/// # Invariants
/// - At most `capacity` frames are occupied.
/// - A page is resident in at most one frame.
#[derive(Debug, Clone)]
pub struct FrameTable {
    frames: Vec<Frame>,

    /// Number of occupied frames.
    len: usize,

    /// Next load sequence number to hand out.
    next_seq: u64,
}

impl FrameTable {
    /// Create a table of `capacity` empty frames.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            frames: vec![Frame::new(); capacity],
            len: 0,
            next_seq: 0,
        }
    }

    /// Total number of frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Number of occupied frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no frame is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if every frame is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.frames.len()
    }

    /// Find the frame holding `page_id`.
    pub fn find(&self, page_id: PageId) -> Option<FrameId> {
        self.frames
            .iter()
            .position(|frame| frame.holds(page_id))
            .map(FrameId::new)
    }

    /// Lowest-indexed empty frame.
    pub fn first_empty(&self) -> Option<FrameId> {
        self.frames
            .iter()
            .position(Frame::is_empty)
            .map(FrameId::new)
    }

    /// Place `page_id` in `frame_id`, overwriting whatever was there.
    ///
    /// Returns the evicted page, if the frame was occupied.
    ///
    /// # Panics
    /// Panics if `frame_id` is out of range.
    pub fn occupy(&mut self, frame_id: FrameId, page_id: PageId) -> Option<PageId> {
        debug_assert!(
            !matches!(self.find(page_id), Some(fid) if fid != frame_id),
            "page {} already resident elsewhere",
            page_id
        );

        let seq = self.next_seq;
        self.next_seq += 1;

        let evicted = self.frames[frame_id.0].load(page_id, seq);
        if evicted.is_none() {
            self.len += 1;
        }
        evicted
    }

    /// Resident page in `frame_id`.
    #[inline]
    pub fn page(&self, frame_id: FrameId) -> Option<PageId> {
        self.frames.get(frame_id.0).and_then(Frame::page_id)
    }

    /// Load sequence number of the page in `frame_id`.
    #[inline]
    pub fn loaded_at(&self, frame_id: FrameId) -> u64 {
        self.frames[frame_id.0].loaded_at()
    }

    /// Iterate over occupied frames in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (FrameId, &Frame)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| !frame.is_empty())
            .map(|(i, frame)| (FrameId::new(i), frame))
    }

    /// Copy of the current contents, one entry per frame.
    pub fn snapshot(&self) -> Vec<Option<PageId>> {
        self.frames.iter().map(Frame::page_id).collect()
    }
}
