//! Page replacement policy implementations (replacers).
//!
//! Every policy owns a [`FrameTable`] and decides which resident page to
//! evict when a requested page is not resident and no frame is free:
//! - [`FifoReplacer`] - First-In-First-Out
//! - [`LruReplacer`] - Least Recently Used
//! - [`LfuReplacer`] - Least Frequently Used
//! - [`MfuReplacer`] - Most Frequently Used
//! - [`OptimalReplacer`] - Belady's optimal (needs the whole reference string)

mod fifo;
mod frequency;
mod lru;
mod optimal;

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, FrameId, PageId, Result};
use crate::memory::FrameTable;
use crate::reference::ReferenceString;

pub use fifo::FifoReplacer;
pub use frequency::{LfuReplacer, MfuReplacer};
pub use lru::LruReplacer;
pub use optimal::OptimalReplacer;

/// What happened to the frame table when a page was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The page was already resident in `slot`.
    Hit { slot: FrameId },

    /// The page was not resident and went into the free frame `slot`.
    InsertedFree { slot: FrameId },

    /// The page was not resident, `evicted` was removed from `slot` and the
    /// new page took its place.
    Replaced { slot: FrameId, evicted: PageId },
}

impl Outcome {
    /// Check if the request was a hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit { .. })
    }

    /// Check if the request was a page fault.
    #[inline]
    pub fn is_fault(&self) -> bool {
        !self.is_hit()
    }

    /// Frame the requested page is resident in afterwards.
    #[inline]
    pub fn slot(&self) -> FrameId {
        match *self {
            Outcome::Hit { slot }
            | Outcome::InsertedFree { slot }
            | Outcome::Replaced { slot, .. } => slot,
        }
    }

    /// Page that was evicted, if any.
    #[inline]
    pub fn evicted(&self) -> Option<PageId> {
        match *self {
            Outcome::Replaced { evicted, .. } => Some(evicted),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hit { slot } => write!(f, "hit in {}", slot),
            Outcome::InsertedFree { slot } => write!(f, "fault, loaded into {}", slot),
            Outcome::Replaced { slot, evicted } => {
                write!(f, "fault, evicted {} from {}", evicted, slot)
            }
        }
    }
}

/// A page replacement policy.
///
/// Implementors supply the policy-specific hooks; [`Replacer::insert`]
/// drives them the same way for every policy:
/// 1. If the page is resident, it is a hit ([`record_hit`](Replacer::record_hit)).
/// 2. Otherwise the lowest free frame is used.
/// 3. Otherwise [`victim`](Replacer::victim) picks the frame to overwrite.
///
/// Either way [`record_load`](Replacer::record_load) runs after a page is
/// placed.
pub trait Replacer: fmt::Debug {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// The frames this policy manages.
    fn frames(&self) -> &FrameTable;

    /// Mutable access for [`Replacer::insert`].
    fn frames_mut(&mut self) -> &mut FrameTable;

    /// The resident page in `slot` was requested again.
    fn record_hit(&mut self, slot: FrameId);

    /// A page was placed in `slot` (evicting `evicted`, if any).
    fn record_load(&mut self, slot: FrameId, evicted: Option<PageId>);

    /// Pick the frame to overwrite. Only called when the table is full.
    ///
    /// `step` is the index of the request being served.
    fn victim(&mut self, step: usize) -> FrameId;

    /// Serve a request for `page_id` at position `step` of the reference string.
    fn insert(&mut self, page_id: PageId, step: usize) -> Outcome {
        if let Some(slot) = self.frames().find(page_id) {
            self.record_hit(slot);
            return Outcome::Hit { slot };
        }

        let slot = match self.frames().first_empty() {
            Some(slot) => slot,
            None => self.victim(step),
        };

        let evicted = self.frames_mut().occupy(slot, page_id);
        self.record_load(slot, evicted);

        match evicted {
            Some(evicted) => Outcome::Replaced { slot, evicted },
            None => Outcome::InsertedFree { slot },
        }
    }
}

/// The five simulated policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyKind {
    Fifo,
    Lru,
    Lfu,
    Mfu,
    Optimal,
}

impl PolicyKind {
    /// All policies, in the order a simulation steps them.
    pub const ALL: [PolicyKind; crate::common::config::POLICY_COUNT] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Lfu,
        PolicyKind::Mfu,
        PolicyKind::Optimal,
    ];

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Lfu => "LFU",
            PolicyKind::Mfu => "MFU",
            PolicyKind::Optimal => "Optimal",
        }
    }

    /// Build a fresh replacer of this kind with `frames` empty frames.
    ///
    /// `reference` is only read by [`PolicyKind::Optimal`].
    pub fn build(self, frames: usize, reference: &ReferenceString) -> Box<dyn Replacer + Send> {
        match self {
            PolicyKind::Fifo => Box::new(FifoReplacer::new(frames)),
            PolicyKind::Lru => Box::new(LruReplacer::new(frames)),
            PolicyKind::Lfu => Box::new(LfuReplacer::new(frames)),
            PolicyKind::Mfu => Box::new(MfuReplacer::new(frames)),
            PolicyKind::Optimal => Box::new(OptimalReplacer::new(frames, reference.clone())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::validation("policy", format!("unknown policy {:?}", s)))
    }
}
