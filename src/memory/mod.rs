//! Simulated physical memory.
//!
//! # Components
//! - [`FrameTable`] - The fixed set of frames one policy manages
//! - [`Frame`] - A slot holding at most one resident page

mod frame;
mod frame_table;

pub use frame::Frame;
pub use frame_table::FrameTable;
