//! Error types for pagesim.

use thiserror::Error;

use crate::simulation::{Action, RunState};

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// Every variant is recoverable: the operation that produced it is aborted
/// and the simulation stays in the state it was in before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Reference string text could not be parsed.
    #[error("Invalid reference string: {0}")]
    Parse(String),

    /// A numeric setting is out of range (frame count, interval, size, range).
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// Step requested with no reference entries left to consume.
    #[error("No pages left in the reference string")]
    PrematureStep,

    /// The requested action is not allowed in the current run state.
    #[error("Cannot {action} while {state}")]
    InvalidTransition { action: Action, state: RunState },

    /// Setup was committed without a reference string or generation parameters.
    #[error("No reference string defined")]
    NoReferenceString,
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}
