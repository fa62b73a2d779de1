//! Error types for the terminal front end.

use rosebloom_core::error::DomainError;
use thiserror::Error;

/// Top-level error type of the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable holds an unusable value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An input line names no known intent.
    #[error("unknown intent: {0:?}")]
    UnknownIntent(String),

    /// The authored experience failed validation at startup.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
