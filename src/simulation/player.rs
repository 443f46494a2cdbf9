//! Player - the timer that steps a simulation automatically.
//!
//! The player runs on its own thread and takes the simulation lock once per
//! tick, so a step is never interleaved with another step, a pause or a stop.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::{debug, warn};
use parking_lot::{Condvar, Mutex};

use crate::common::{Error, Result};
use crate::simulation::{RunState, Simulation, StepReport};

/// A simulation shared between its owner and a [`Player`].
pub type SharedSimulation = Arc<Mutex<Simulation>>;

/// Callback that receives every report produced while playing.
///
/// The sink runs after the simulation lock is released, so it may lock the
/// [`SharedSimulation`] itself, e.g. to read statistics.
pub type StepSink = Box<dyn FnMut(&StepReport) + Send>;

/// Cancellation flag the timer thread sleeps on.
#[derive(Debug, Default)]
struct Cancel {
    cancelled: Mutex<bool>,
    wakeup: Condvar,
}

impl Cancel {
    fn cancel(&self) {
        *self.cancelled.lock() = true;
        self.wakeup.notify_all();
    }

    /// Sleep until `deadline`. Returns true if cancelled meanwhile.
    fn sleep_until(&self, deadline: Instant) -> bool {
        let mut cancelled = self.cancelled.lock();
        while !*cancelled {
            if self.wakeup.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}

/// Periodic stepping of a [`SharedSimulation`].
///
/// Each player owns one play of the simulation, identified by
/// [`Simulation::play_generation`]. Its timer exits as soon as that play is
/// over, whether it ended, was paused or stopped through the player, or was
/// paused directly on the simulation and played again by someone else.
///
/// Dropping the player cancels the timer, waits for its thread and pauses a
/// run that is still playing under this player.
///
/// # Usage
/// ```
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use pagesim::{Player, RunState, Simulation, SimulationConfig, StepReport};
///
/// let mut sim = Simulation::new(SimulationConfig::new(3, 0).unwrap());
/// sim.define_reference("1,2,3,4,1,2").unwrap();
/// sim.commit_setup(None).unwrap();
///
/// let sim = Arc::new(Mutex::new(sim));
/// let player = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {})).unwrap();
/// player.wait();
/// assert_eq!(sim.lock().state(), RunState::Ended);
/// ```
#[derive(Debug)]
pub struct Player {
    simulation: SharedSimulation,
    generation: u64,
    cancel: Arc<Cancel>,
    handle: Option<JoinHandle<()>>,
}

impl Player {
    /// Put the simulation in Playing and start the timer.
    ///
    /// Every tick performs one [`Simulation::step`] and hands the report to
    /// `sink`. The timer stops on its own after the last reference.
    ///
    /// # Errors
    /// `Error::InvalidTransition` unless the simulation is Ready.
    pub fn start(simulation: SharedSimulation, mut sink: StepSink) -> Result<Self> {
        let (interval, generation) = {
            let mut sim = simulation.lock();
            let interval = sim.play()?;
            (interval, sim.play_generation())
        };
        let cancel = Arc::new(Cancel::default());

        let handle = {
            let simulation = Arc::clone(&simulation);
            let cancel = Arc::clone(&cancel);
            thread::spawn(move || loop {
                if cancel.sleep_until(Instant::now() + interval) {
                    debug!("Player {} cancelled", generation);
                    return;
                }

                let result = {
                    let mut sim = simulation.lock();
                    if sim.state() != RunState::Playing || sim.play_generation() != generation {
                        debug!("Player {} outlived its play", generation);
                        return;
                    }
                    sim.step()
                };
                match result {
                    Ok(report) => {
                        sink(&report);
                        if report.ended {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("Player {} stopped: {}", generation, e);
                        return;
                    }
                }
            })
        };

        Ok(Self {
            simulation,
            generation,
            cancel,
            handle: Some(handle),
        })
    }

    /// Block until the timer stops on its own (end of the reference string).
    pub fn wait(mut self) {
        self.join();
    }

    /// Cancel the timer and pause the simulation.
    ///
    /// Pausing a run that already ended is not an error.
    pub fn pause(mut self) -> Result<()> {
        self.cancel_and_join();
        let result = self.simulation.lock().pause();
        match result {
            Err(Error::InvalidTransition {
                state: RunState::Ended,
                ..
            }) => Ok(()),
            other => other,
        }
    }

    /// Cancel the timer and rewind the simulation (see [`Simulation::stop`]).
    pub fn stop(mut self) -> Result<()> {
        self.cancel_and_join();
        let result = self.simulation.lock().stop();
        result
    }

    /// Check if the timer thread is still running.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel the timer and pause the run if it is still this player's.
    fn release(&mut self) {
        self.cancel_and_join();
        let mut sim = self.simulation.lock();
        if sim.state() == RunState::Playing && sim.play_generation() == self.generation {
            if let Err(e) = sim.pause() {
                warn!("Player {} could not pause on drop: {}", self.generation, e);
            }
        }
    }

    fn cancel_and_join(&mut self) {
        self.cancel.cancel();
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Player thread panicked");
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::SimulationConfig;
    use crate::replacer::PolicyKind;
    use std::time::Duration;

    fn shared(interval_ms: i64, reference: &str) -> SharedSimulation {
        let mut sim = Simulation::new(SimulationConfig::new(3, interval_ms).unwrap());
        sim.define_reference(reference).unwrap();
        sim.commit_setup(None).unwrap();
        Arc::new(Mutex::new(sim))
    }

    #[test]
    fn test_player_runs_to_end() {
        let sim = shared(0, "7,0,1,2,0,3,0,4");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = {
            let seen = Arc::clone(&seen);
            Box::new(move |report: &StepReport| seen.lock().push(report.index))
        };
        Player::start(Arc::clone(&sim), sink).unwrap().wait();

        assert_eq!(*seen.lock(), (0..8).collect::<Vec<_>>());
        assert_eq!(sim.lock().state(), RunState::Ended);
    }

    #[test]
    fn test_player_requires_ready() {
        let sim = shared(0, "1,2");
        sim.lock().play().unwrap();

        let result = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {}));
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));
    }

    #[test]
    fn test_pause_stops_timer_and_keeps_progress() {
        let sim = shared(60_000, "1,2,3");
        let player = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {})).unwrap();
        assert!(player.is_running());

        player.pause().unwrap();

        let sim = sim.lock();
        assert_eq!(sim.state(), RunState::Ready);
        // The first tick is a minute away, so nothing was consumed.
        assert_eq!(sim.index(), None);
    }

    #[test]
    fn test_stop_rewinds() {
        let sim = shared(1, "1,2,3,4,5,6,7,8,9");
        let player = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {})).unwrap();
        std::thread::sleep(Duration::from_millis(5));

        player.stop().unwrap();

        let sim = sim.lock();
        assert_eq!(sim.state(), RunState::Ready);
        assert_eq!(sim.index(), None);
    }

    #[test]
    fn test_drop_returns_run_to_ready() {
        let sim = shared(60_000, "1,2,3");
        let player = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {})).unwrap();
        drop(player);
        assert_eq!(sim.lock().state(), RunState::Ready);

        // The run can be played again.
        let player = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {})).unwrap();
        assert_eq!(sim.lock().state(), RunState::Playing);
        player.pause().unwrap();
    }

    #[test]
    fn test_drop_leaves_later_play_alone() {
        let sim = shared(60_000, "1,2,3");
        let first = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {})).unwrap();
        sim.lock().pause().unwrap();
        let second = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {})).unwrap();

        drop(first);
        assert_eq!(sim.lock().state(), RunState::Playing);
        assert!(second.is_running());
        second.stop().unwrap();
    }

    #[test]
    fn test_direct_pause_retires_old_timer() {
        let sim = shared(100, "1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20");
        let stale = Player::start(Arc::clone(&sim), Box::new(|_: &StepReport| {})).unwrap();
        sim.lock().pause().unwrap();

        let steps = Arc::new(Mutex::new(0usize));
        let sink = {
            let steps = Arc::clone(&steps);
            Box::new(move |_: &StepReport| *steps.lock() += 1)
        };
        let current = Player::start(Arc::clone(&sim), sink).unwrap();
        std::thread::sleep(Duration::from_millis(450));

        // Only the current timer steps: at most one step per 100ms.
        assert!(!stale.is_running());
        let consumed = sim.lock().index().map_or(0, |i| i + 1);
        assert!(consumed <= 4, "{} steps in 450ms", consumed);
        assert!(*steps.lock() <= consumed);

        current.pause().unwrap();
        drop(stale);
        assert_eq!(sim.lock().state(), RunState::Ready);
    }

    #[test]
    fn test_sink_may_lock_simulation() {
        let sim = shared(0, "1,2,1,3");
        let hits = Arc::new(Mutex::new(Vec::new()));

        let sink = {
            let sim = Arc::clone(&sim);
            let hits = Arc::clone(&hits);
            Box::new(move |_: &StepReport| {
                let fifo_hits = sim.lock().stats(PolicyKind::Fifo).map_or(0, |s| s.hits);
                hits.lock().push(fifo_hits);
            })
        };
        Player::start(Arc::clone(&sim), sink).unwrap().wait();

        assert_eq!(*hits.lock(), vec![0, 0, 1, 1]);
    }
}
