//! Run states and the actions that move between them.

use std::fmt;

/// Where a [`Simulation`](super::Simulation) is in its lifecycle.
///
/// ```text
///            commit_setup           play
///   Setup ───────────────▶ Ready ◀──────▶ Playing
///     ▲                    │  ▲    pause     │
///     │ enter_setup        │  │ stop         │ last step
///     └────────────────────┘  │              ▼
///     └───────────────────── Ended ◀─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Frame count, interval and reference string may be edited.
    Setup,
    /// Policies are built; stepping is manual. A paused run is also Ready.
    Ready,
    /// A timer is stepping the simulation.
    Playing,
    /// The last reference has been consumed.
    Ended,
}

impl RunState {
    /// Check if `action` is allowed in this state.
    pub fn allows(self, action: Action) -> bool {
        use Action::*;
        use RunState::*;

        match action {
            EnterSetup => matches!(self, Setup | Ready | Ended),
            Configure | DefineReference | GenerateReference | CommitSetup => self == Setup,
            Play => self == Ready,
            Pause => self == Playing,
            Step => matches!(self, Ready | Playing),
            Stop => matches!(self, Ready | Playing | Ended),
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Setup => "in setup",
            RunState::Ready => "ready",
            RunState::Playing => "playing",
            RunState::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// A request to the simulation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    EnterSetup,
    Configure,
    DefineReference,
    GenerateReference,
    CommitSetup,
    Play,
    Pause,
    Step,
    Stop,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::EnterSetup => "enter setup",
            Action::Configure => "configure",
            Action::DefineReference => "define a reference string",
            Action::GenerateReference => "generate a reference string",
            Action::CommitSetup => "commit setup",
            Action::Play => "play",
            Action::Pause => "pause",
            Action::Step => "step",
            Action::Stop => "stop",
        };
        f.write_str(name)
    }
}
