//! Configuration constants and the validated run configuration.

use std::time::Duration;

use crate::common::{Error, Result};

/// Number of replacement policies simulated side by side.
pub const POLICY_COUNT: usize = 5;

/// Frame count offered before the user picks one.
pub const DEFAULT_FRAMES: usize = 3;

/// Delay between automatic steps while playing.
///
/// Zero means "step as fast as the timer can fire".
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 0;

/// Reference string length used when one has to be generated.
pub const DEFAULT_REFERENCE_SIZE: usize = 20;

/// Generated page numbers fall in `[0, DEFAULT_PAGE_RANGE)`.
pub const DEFAULT_PAGE_RANGE: u32 = 10;

/// Largest accepted frame count. Every policy allocates this many frames.
pub const MAX_FRAMES: usize = 1 << 16;

/// Largest reference string [`ReferenceString::generate`] will build.
///
/// [`ReferenceString::generate`]: crate::ReferenceString::generate
pub const MAX_REFERENCE_SIZE: usize = 1 << 20;

/// Frame count and playback speed committed for one run.
///
/// Fields are private so a `SimulationConfig` always holds a positive frame
/// count; build one with [`SimulationConfig::new`] or
/// [`SimulationConfig::from_text`].
///
/// # Example
/// ```
/// use pagesim::SimulationConfig;
///
/// let config = SimulationConfig::new(4, 250).unwrap();
/// assert_eq!(config.frames(), 4);
/// assert!(SimulationConfig::new(0, 250).is_err());
/// assert!(SimulationConfig::new(4, -1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    frames: usize,
    step_interval_ms: u64,
}

impl SimulationConfig {
    /// Validate a frame count (in `1..=MAX_FRAMES`) and step interval
    /// (>= 0, milliseconds).
    pub fn new(frames: i64, step_interval_ms: i64) -> Result<Self> {
        if frames <= 0 {
            return Err(Error::validation(
                "frame count",
                format!("{} is not a positive integer", frames),
            ));
        }
        if step_interval_ms < 0 {
            return Err(Error::validation(
                "play step interval",
                format!("{} is negative", step_interval_ms),
            ));
        }
        let frames = usize::try_from(frames)
            .ok()
            .filter(|&frames| frames <= MAX_FRAMES)
            .ok_or_else(|| {
                Error::validation(
                    "frame count",
                    format!("{} is larger than {}", frames, MAX_FRAMES),
                )
            })?;

        Ok(Self {
            frames,
            step_interval_ms: step_interval_ms as u64,
        })
    }

    /// Validate the raw text of the frame count and interval fields.
    pub fn from_text(frames: &str, step_interval_ms: &str) -> Result<Self> {
        let frames = frames.trim().parse::<i64>().map_err(|_| {
            Error::validation("frame count", format!("{:?} is not an integer", frames))
        })?;
        let step_interval_ms = step_interval_ms.trim().parse::<i64>().map_err(|_| {
            Error::validation(
                "play step interval",
                format!("{:?} is not an integer", step_interval_ms),
            )
        })?;
        Self::new(frames, step_interval_ms)
    }

    /// Number of frames every policy gets.
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Delay between automatic steps, in milliseconds.
    #[inline]
    pub fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms
    }

    /// Delay between automatic steps.
    #[inline]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
        }
    }
}
