//! pagesim - Page replacement policies simulated side by side.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagesim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Playback (simulation/)                      │   │
//! │  │   Simulation state machine + Player (periodic stepping)  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                  ↓ one page per step, to every policy          │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Policies (replacer/)                        │   │
//! │  │       FIFO | LRU | LFU | MFU | Optimal (lookahead)       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Memory (memory/)                            │   │
//! │  │             FrameTable + Frame occupancy                 │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │  Input (reference)  ReferenceString: parsed | generated  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`memory`] - Frame tables
//! - [`replacer`] - Eviction policy implementations
//! - [`reference`] - Reference strings
//! - [`simulation`] - Lockstep controller, timer and statistics
//!
//! # Quick Start
//! ```
//! use pagesim::{PolicyKind, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::new(3, 0).unwrap());
//! sim.define_reference("7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2").unwrap();
//! sim.commit_setup(None).unwrap();
//!
//! let report = sim.step().unwrap();
//! assert_eq!(report.page.0, 7);
//!
//! sim.run_to_end().unwrap();
//! assert_eq!(sim.stats(PolicyKind::Optimal).unwrap().faults, 7);
//! ```

pub mod common;
pub mod memory;
pub mod reference;
pub mod replacer;
pub mod simulation;

// Re-export commonly used items at crate root for convenience
pub use common::config::SimulationConfig;
pub use common::{Error, FrameId, PageId, Result};

pub use memory::{Frame, FrameTable};
pub use reference::{GenerateParams, ReferenceString};
pub use replacer::{Outcome, PolicyKind, Replacer};
pub use simulation::{
    Action, Player, PolicyReport, PolicyStats, RunState, SharedSimulation, Simulation,
    StepReport, StepSink,
};
