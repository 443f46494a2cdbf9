//! Frame - one slot of simulated physical memory.
//!
//! A [`Frame`] holds at most one resident page plus the load sequence number
//! stamped when that page was placed. Policies use the sequence number to
//! break ties in favor of the page that has been resident the longest.

use crate::common::PageId;

/// A slot in a [`FrameTable`](super::FrameTable).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    /// Which page is resident, or None if the frame is empty.
    page_id: Option<PageId>,

    /// Load sequence number of the resident page (meaningless when empty).
    loaded_at: u64,
}

impl Frame {
    /// Create a new empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the resident page.
    #[inline]
    pub fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    /// Load sequence number of the resident page.
    #[inline]
    pub fn loaded_at(&self) -> u64 {
        self.loaded_at
    }

    /// Check if the frame is empty (no page resident).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page_id.is_none()
    }

    /// Check if `page_id` is the resident page.
    #[inline]
    pub fn holds(&self, page_id: PageId) -> bool {
        self.page_id == Some(page_id)
    }

    /// Place `page_id` in this frame, returning the previous occupant.
    pub(crate) fn load(&mut self, page_id: PageId, loaded_at: u64) -> Option<PageId> {
        self.loaded_at = loaded_at;
        self.page_id.replace(page_id)
    }
}
