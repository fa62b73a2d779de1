//! Domain events for the Stage Orchestration context.

use rosebloom_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::content::Element;
use super::stage::Stage;

/// Event payload variants for the Stage Orchestration context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageEventKind {
    /// A stage runtime was constructed and became live.
    StageEntered {
        /// The stage now live.
        stage: Stage,
    },
    /// A stage runtime was torn down.
    StageExited {
        /// The stage that was live.
        stage: Stage,
        /// Timers still pending at teardown and cancelled by it.
        cancelled_timers: usize,
    },
    /// An element became visible.
    ElementShown {
        /// The element.
        element: Element,
    },
    /// An element stopped being visible.
    ElementHidden {
        /// The element.
        element: Element,
    },
    /// The typewriter revealed one more character.
    TextAdvanced {
        /// Characters visible.
        revealed: usize,
    },
    /// The typewriter revealed the whole text.
    TextCompleted {
        /// Characters in the text.
        length: usize,
    },
    /// A tap was accepted by the watering machine.
    Watered {
        /// Accepted taps.
        tap_count: u32,
        /// Progress after the tap.
        progress: u32,
        /// Index of the message to show.
        message_index: usize,
    },
    /// Watering progress reached the maximum.
    Bloomed {
        /// Accepted taps.
        tap_count: u32,
    },
    /// The envelope was opened.
    EnvelopeOpened,
    /// The cinematic wish started playing.
    CinematicStarted,
    /// The rose started its hint shake.
    ShakeStarted,
    /// The rose stopped shaking.
    ShakeStopped,
    /// A flipbook page was turned.
    PageTurned {
        /// Zero-based page now showing.
        page: usize,
    },
}

impl StageEventKind {
    /// The event type name for this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            StageEventKind::StageEntered { .. } => "stage.entered",
            StageEventKind::StageExited { .. } => "stage.exited",
            StageEventKind::ElementShown { .. } => "stage.element_shown",
            StageEventKind::ElementHidden { .. } => "stage.element_hidden",
            StageEventKind::TextAdvanced { .. } => "stage.text_advanced",
            StageEventKind::TextCompleted { .. } => "stage.text_completed",
            StageEventKind::Watered { .. } => "stage.watered",
            StageEventKind::Bloomed { .. } => "stage.bloomed",
            StageEventKind::EnvelopeOpened => "stage.envelope_opened",
            StageEventKind::CinematicStarted => "stage.cinematic_started",
            StageEventKind::ShakeStarted => "stage.shake_started",
            StageEventKind::ShakeStopped => "stage.shake_stopped",
            StageEventKind::PageTurned { .. } => "stage.page_turned",
        }
    }
}

/// Domain event envelope for the Stage Orchestration context.
#[derive(Debug, Clone)]
pub struct StageEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Stage that was live when the event was recorded.
    pub stage: Stage,
    /// Event-specific payload.
    pub kind: StageEventKind,
}

impl DomainEvent for StageEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
