//! Simulation - the step-driven controller.
//!
//! The [`Simulation`] owns:
//! - The run configuration and reference string
//! - One replacer per [`PolicyKind`], all with the same frame count
//! - The index of the last consumed reference
//! - The run state machine

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::config::SimulationConfig;
use crate::common::{Error, Result};
use crate::reference::{GenerateParams, ReferenceString};
use crate::replacer::{PolicyKind, Replacer};
use crate::simulation::{Action, PolicyReport, PolicyStats, RunState, StepReport};

/// Feeds one reference string to all five policies in lockstep.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                        Simulation                           │
/// │  ┌──────────────┐   index   ┌────────────────────────────┐  │
/// │  │  reference   │─────────▶ │ policies (PolicyKind::ALL) │  │
/// │  │ [7, 0, 1, …] │   page    │ FIFO LRU LFU MFU Optimal   │  │
/// │  └──────────────┘           └────────────────────────────┘  │
/// │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐       │
/// │  │    state     │  │    config    │  │    stats     │       │
/// │  │  RunState    │  │ frames, ms   │  │ per policy   │       │
/// │  └──────────────┘  └──────────────┘  └──────────────┘       │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// Every transition either succeeds or returns an [`Error`] and leaves the
/// simulation exactly as it was.
///
/// # Usage
/// ```
/// use pagesim::{PolicyKind, RunState, Simulation, SimulationConfig};
///
/// let mut sim = Simulation::new(SimulationConfig::new(3, 0).unwrap());
/// sim.define_reference("1, 2, 3, 1, 4").unwrap();
/// sim.commit_setup(None).unwrap();
///
/// let reports = sim.run_to_end().unwrap();
/// assert_eq!(reports.len(), 5);
/// assert_eq!(sim.state(), RunState::Ended);
/// assert_eq!(sim.stats(PolicyKind::Lru).unwrap().faults, 4);
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    reference: Option<ReferenceString>,
    state: RunState,

    /// Index of the last consumed reference; None before the first step.
    index: Option<usize>,

    /// One replacer per policy, in `PolicyKind::ALL` order. Empty in Setup.
    policies: Vec<Box<dyn Replacer + Send>>,

    /// Parallel to `policies`.
    stats: Vec<PolicyStats>,

    /// Bumped by every `play`, so a timer can tell its own run from a later one.
    play_generation: u64,

    rng: StdRng,
}

impl Simulation {
    /// Create a simulation in the Setup state with no reference string.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Like [`Simulation::new`], but reference strings are generated from a
    /// fixed seed.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rng: StdRng) -> Self {
        Self {
            config,
            reference: None,
            state: RunState::Setup,
            index: None,
            policies: Vec::new(),
            stats: Vec::new(),
            play_generation: 0,
            rng,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current run state.
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Index of the last consumed reference, or None before the first step.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The configuration the next (or current) run uses.
    #[inline]
    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// The reference string, if one has been defined or generated.
    #[inline]
    pub fn reference(&self) -> Option<&ReferenceString> {
        self.reference.as_ref()
    }

    /// The replacer for `kind`, once setup has been committed.
    pub fn policy(&self, kind: PolicyKind) -> Option<&(dyn Replacer + Send)> {
        self.policies
            .iter()
            .find(|policy| policy.kind() == kind)
            .map(|policy| policy.as_ref())
    }

    /// Statistics for `kind` since the run was last reset.
    pub fn stats(&self, kind: PolicyKind) -> Option<PolicyStats> {
        let pos = self.policies.iter().position(|policy| policy.kind() == kind)?;
        self.stats.get(pos).copied()
    }

    /// Statistics for every policy, in `PolicyKind::ALL` order.
    pub fn all_stats(&self) -> Vec<(PolicyKind, PolicyStats)> {
        self.policies
            .iter()
            .map(|policy| policy.kind())
            .zip(self.stats.iter().copied())
            .collect()
    }

    /// Number of references not consumed yet.
    pub fn remaining(&self) -> usize {
        let len = self.reference.as_ref().map_or(0, |r| r.len());
        match self.index {
            Some(index) => len - index - 1,
            None => len,
        }
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Return to the editable Setup state.
    ///
    /// The reference string is kept until it is redefined or regenerated.
    ///
    /// # Errors
    /// `Error::InvalidTransition` while playing.
    pub fn enter_setup(&mut self) -> Result<()> {
        self.guard(Action::EnterSetup)?;

        self.index = None;
        self.policies.clear();
        self.stats.clear();
        self.transition(RunState::Setup);
        Ok(())
    }

    /// Replace the configuration for the next run.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<()> {
        self.guard(Action::Configure)?;

        debug!(
            "Configured {} frames, {} ms step interval",
            config.frames(),
            config.step_interval_ms()
        );
        self.config = config;
        Ok(())
    }

    /// Parse and adopt an explicit reference string.
    ///
    /// On a parse error the previous reference string is kept.
    pub fn define_reference(&mut self, text: &str) -> Result<&ReferenceString> {
        self.guard(Action::DefineReference)?;

        let reference = ReferenceString::parse(text).inspect_err(|e| warn!("{}", e))?;
        info!("Reference string defined: {}", reference);
        Ok(self.reference.insert(reference))
    }

    /// Generate and adopt a random reference string.
    pub fn generate_reference(&mut self, params: GenerateParams) -> Result<&ReferenceString> {
        self.guard(Action::GenerateReference)?;
        self.generate(params)
    }

    fn generate(&mut self, params: GenerateParams) -> Result<&ReferenceString> {
        let reference = ReferenceString::generate_with(params.size, params.range, &mut self.rng)
            .inspect_err(|e| warn!("{}", e))?;
        info!("The following reference string has been generated: {}", reference);
        Ok(self.reference.insert(reference))
    }

    /// Leave Setup and build fresh policies.
    ///
    /// If no reference string exists yet one is generated from `fallback`.
    ///
    /// # Errors
    /// - `Error::NoReferenceString` if there is no reference and no `fallback`
    /// - `Error::Validation` if `fallback` is invalid
    pub fn commit_setup(&mut self, fallback: Option<GenerateParams>) -> Result<()> {
        self.guard(Action::CommitSetup)?;

        if let Some(reference) = &self.reference {
            info!("Using the following reference string: {}", reference);
        } else if let Some(params) = fallback {
            self.generate(params)?;
        } else {
            warn!("Setup aborted: no reference string");
            return Err(Error::NoReferenceString);
        }

        self.reset();
        Ok(())
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Start automatic stepping. Returns the configured step interval.
    ///
    /// The caller owns the timer; see [`Player`](super::Player).
    pub fn play(&mut self) -> Result<std::time::Duration> {
        self.guard(Action::Play)?;
        self.play_generation += 1;
        self.transition(RunState::Playing);
        Ok(self.config.step_interval())
    }

    /// Number of times `play` has succeeded.
    #[inline]
    pub fn play_generation(&self) -> u64 {
        self.play_generation
    }

    /// Stop automatic stepping. Index and policy state are kept.
    pub fn pause(&mut self) -> Result<()> {
        self.guard(Action::Pause)?;
        self.transition(RunState::Ready);
        Ok(())
    }

    /// Feed the next reference to every policy.
    ///
    /// # Errors
    /// - `Error::PrematureStep` if the whole reference string was consumed
    /// - `Error::InvalidTransition` in Setup
    pub fn step(&mut self) -> Result<StepReport> {
        if self.state == RunState::Ended {
            return Err(Error::PrematureStep);
        }
        self.guard(Action::Step)?;

        let reference = match &self.reference {
            Some(reference) => reference,
            None => return Err(Error::NoReferenceString),
        };
        let index = self.index.map_or(0, |i| i + 1);
        let page = match reference.get(index) {
            Some(&page) => page,
            None => return Err(Error::PrematureStep),
        };
        let ended = index + 1 == reference.len();

        let policies = self
            .policies
            .iter_mut()
            .zip(self.stats.iter_mut())
            .map(|(policy, stats)| {
                let outcome = policy.insert(page, index);
                stats.record(&outcome);
                debug!("{} page {} at {}: {}", policy.kind(), page, index, outcome);
                PolicyReport {
                    kind: policy.kind(),
                    outcome,
                    frames: policy.frames().snapshot(),
                }
            })
            .collect();

        self.index = Some(index);
        if ended {
            self.transition(RunState::Ended);
        }

        Ok(StepReport {
            index,
            page,
            policies,
            ended,
        })
    }

    /// Rewind to the first reference with fresh policies.
    pub fn stop(&mut self) -> Result<()> {
        self.guard(Action::Stop)?;
        self.reset();
        Ok(())
    }

    /// Step until the reference string is consumed.
    ///
    /// Works from Ready or Playing; returns the reports of every step taken.
    pub fn run_to_end(&mut self) -> Result<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(self.remaining());
        while self.state != RunState::Ended {
            reports.push(self.step()?);
        }
        Ok(reports)
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn guard(&self, action: Action) -> Result<()> {
        if self.state.allows(action) {
            Ok(())
        } else {
            warn!("Rejected {} while {}", action, self.state);
            Err(Error::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn transition(&mut self, next: RunState) {
        if self.state != next {
            info!("Simulation {} -> {}", self.state, next);
            self.state = next;
        }
    }

    /// Rebuild every policy and rewind. Only called with a reference string.
    fn reset(&mut self) {
        let Some(reference) = &self.reference else {
            return;
        };
        let frames = self.config.frames();

        self.policies = PolicyKind::ALL
            .into_iter()
            .map(|kind| kind.build(frames, reference))
            .collect();
        self.stats = vec![PolicyStats::new(); self.policies.len()];
        self.index = None;
        self.transition(RunState::Ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PageId;
    use crate::replacer::Outcome;

    fn ready(frames: i64, reference: &str) -> Simulation {
        let mut sim = Simulation::new(SimulationConfig::new(frames, 0).unwrap());
        sim.define_reference(reference).unwrap();
        sim.commit_setup(None).unwrap();
        sim
    }

    #[test]
    fn test_new_simulation_is_in_setup() {
        let sim = Simulation::new(SimulationConfig::default());
        assert_eq!(sim.state(), RunState::Setup);
        assert_eq!(sim.index(), None);
        assert!(sim.reference().is_none());
        assert!(sim.policy(PolicyKind::Fifo).is_none());
    }

    #[test]
    fn test_commit_without_reference_fails() {
        let mut sim = Simulation::new(SimulationConfig::default());
        assert_eq!(sim.commit_setup(None), Err(Error::NoReferenceString));
        assert_eq!(sim.state(), RunState::Setup);

        // Invalid generation parameters abort too.
        assert!(sim.commit_setup(Some(GenerateParams::new(0, 5))).is_err());
        assert_eq!(sim.state(), RunState::Setup);
        assert!(sim.reference().is_none());
    }

    #[test]
    fn test_commit_generates_fallback_reference() {
        let mut sim = Simulation::with_seed(SimulationConfig::default(), 42);
        sim.commit_setup(Some(GenerateParams::new(12, 4))).unwrap();

        assert_eq!(sim.state(), RunState::Ready);
        assert_eq!(sim.reference().unwrap().len(), 12);
        assert_eq!(sim.remaining(), 12);
    }

    #[test]
    fn test_commit_builds_all_policies() {
        let sim = ready(4, "1,2,3");
        for kind in PolicyKind::ALL {
            let policy = sim.policy(kind).unwrap();
            assert_eq!(policy.frames().capacity(), 4);
            assert_eq!(sim.stats(kind), Some(PolicyStats::new()));
        }
    }

    #[test]
    fn test_step_feeds_every_policy() {
        let mut sim = ready(2, "5, 6");
        let report = sim.step().unwrap();

        assert_eq!(report.index, 0);
        assert_eq!(report.page, PageId::new(5));
        assert!(!report.ended);
        assert_eq!(report.policies.len(), PolicyKind::ALL.len());
        for (policy, kind) in report.policies.iter().zip(PolicyKind::ALL) {
            assert_eq!(policy.kind, kind);
            assert!(matches!(policy.outcome, Outcome::InsertedFree { .. }));
            assert_eq!(policy.frames, vec![Some(PageId::new(5)), None]);
        }
        assert_eq!(sim.index(), Some(0));
    }

    #[test]
    fn test_last_step_ends_run() {
        let mut sim = ready(2, "5, 6");
        sim.step().unwrap();
        let report = sim.step().unwrap();

        assert!(report.ended);
        assert_eq!(sim.state(), RunState::Ended);
        assert_eq!(sim.remaining(), 0);

        // Stepping past the end changes nothing.
        assert_eq!(sim.step(), Err(Error::PrematureStep));
        assert_eq!(sim.index(), Some(1));
        assert_eq!(sim.state(), RunState::Ended);
    }

    #[test]
    fn test_play_pause_guards() {
        let mut sim = ready(2, "1,2,3");

        assert!(matches!(
            sim.pause(),
            Err(Error::InvalidTransition {
                action: Action::Pause,
                state: RunState::Ready
            })
        ));

        assert_eq!(sim.play().unwrap(), std::time::Duration::ZERO);
        assert_eq!(sim.state(), RunState::Playing);
        assert!(sim.play().is_err());
        assert!(sim.enter_setup().is_err());

        sim.step().unwrap();
        sim.pause().unwrap();
        assert_eq!(sim.state(), RunState::Ready);
        assert_eq!(sim.index(), Some(0));
    }

    #[test]
    fn test_play_generation_counts_successful_plays() {
        let mut sim = ready(2, "1,2,3");
        assert_eq!(sim.play_generation(), 0);

        sim.play().unwrap();
        assert!(sim.play().is_err());
        assert_eq!(sim.play_generation(), 1);

        sim.pause().unwrap();
        sim.play().unwrap();
        assert_eq!(sim.play_generation(), 2);
    }

    #[test]
    fn test_stop_rewinds_with_fresh_policies() {
        let mut sim = ready(2, "1,2,3");
        sim.run_to_end().unwrap();

        sim.stop().unwrap();
        assert_eq!(sim.state(), RunState::Ready);
        assert_eq!(sim.index(), None);
        assert!(sim.policy(PolicyKind::Lfu).unwrap().frames().is_empty());
        assert_eq!(sim.stats(PolicyKind::Lfu).unwrap().requests(), 0);
    }

    #[test]
    fn test_setup_keeps_reference() {
        let mut sim = ready(2, "1,2,3");
        sim.step().unwrap();

        sim.enter_setup().unwrap();
        assert_eq!(sim.state(), RunState::Setup);
        assert_eq!(sim.index(), None);
        assert!(sim.policy(PolicyKind::Fifo).is_none());
        assert_eq!(sim.reference().unwrap().len(), 3);
        assert!(matches!(sim.step(), Err(Error::InvalidTransition { .. })));

        sim.configure(SimulationConfig::new(5, 10).unwrap()).unwrap();
        sim.commit_setup(None).unwrap();
        assert_eq!(sim.policy(PolicyKind::Mfu).unwrap().frames().capacity(), 5);
    }

    #[test]
    fn test_editing_rejected_outside_setup() {
        let mut sim = ready(2, "1,2,3");

        assert!(sim.define_reference("4,5").is_err());
        assert!(sim.generate_reference(GenerateParams::default()).is_err());
        assert!(sim.configure(SimulationConfig::default()).is_err());
        assert_eq!(sim.reference().unwrap().to_string(), "[1, 2, 3]");
    }

    #[test]
    fn test_bad_reference_keeps_previous() {
        let mut sim = Simulation::new(SimulationConfig::default());
        sim.define_reference("1,2").unwrap();

        assert!(matches!(sim.define_reference("1,,2"), Err(Error::Parse(_))));
        assert_eq!(sim.reference().unwrap().len(), 2);
    }
}
