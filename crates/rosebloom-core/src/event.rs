//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for routing in renderers.
    pub event_type: String,
    /// Monotonically increasing position in the controller's event stream.
    pub sequence_number: i64,
    /// Correlation ID of the intent (or timer run) that caused this event.
    pub correlation_id: Uuid,
    /// Wall-clock timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
    /// Virtual milliseconds since the controller started.
    pub elapsed_ms: u64,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}
