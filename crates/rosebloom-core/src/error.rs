//! Domain error types.

use thiserror::Error;

/// Construction-time validation failures.
///
/// Runtime misuse (double taps, restarting a running stage) is never an
/// error: those inputs are ignored by the state machines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A sequence step was declared with an offset earlier than its predecessor.
    #[error("sequence offsets must be non-decreasing: step {index} at {offset_ms}ms follows {previous_ms}ms")]
    NonMonotonicOffset {
        /// Position of the offending step.
        index: usize,
        /// The offending offset.
        offset_ms: u64,
        /// The offset of the step before it.
        previous_ms: u64,
    },

    /// A typewriter was configured with a zero tick interval.
    #[error("typewriter tick interval must be positive")]
    ZeroTickInterval,

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),
}
