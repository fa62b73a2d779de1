//! User intent abstractions.

use uuid::Uuid;

/// Trait implemented by every discrete user intent a renderer can emit.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this intent through the events it causes.
    fn correlation_id(&self) -> Uuid;
}
