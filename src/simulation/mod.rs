//! Lockstep simulation of all replacement policies.
//!
//! # Components
//! - [`Simulation`] - Owns the policies and the run state machine
//! - [`Player`] - Timer that steps a shared simulation automatically
//! - [`StepReport`] / [`PolicyReport`] - What one step produced
//! - [`PolicyStats`] - Hit/fault counters per policy

mod controller;
mod player;
mod report;
mod state;
mod stats;

pub use controller::Simulation;
pub use player::{Player, SharedSimulation, StepSink};
pub use report::{PolicyReport, StepReport};
pub use state::{Action, RunState};
pub use stats::PolicyStats;
