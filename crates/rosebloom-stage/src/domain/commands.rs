//! User intents accepted by the Stage Orchestration context.

use std::fmt;

use rosebloom_core::command::Command;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A discrete user intent emitted by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Press the stage's continue button.
    Continue,
    /// Water the seed.
    Tap,
    /// Open the envelope.
    Open,
    /// Ask for a hint on the rose stage.
    Hint,
    /// Click the hero rose.
    BloomClick,
    /// Keep the rose after the message.
    KeepRose,
}

impl Intent {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Intent::Continue => "continue",
            Intent::Tap => "tap",
            Intent::Open => "open",
            Intent::Hint => "hint",
            Intent::BloomClick => "bloom_click",
            Intent::KeepRose => "keep_rose",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command carrying one intent into the stage controller.
#[derive(Debug, Clone)]
pub struct SubmitIntent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The intent.
    pub intent: Intent,
}

impl SubmitIntent {
    /// Wraps `intent` with a fresh correlation ID.
    #[must_use]
    pub fn new(intent: Intent) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            intent,
        }
    }
}

impl Command for SubmitIntent {
    fn command_type(&self) -> &'static str {
        "stage.submit_intent"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
