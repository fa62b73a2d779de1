//! The ordered set of stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One top-level phase of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Greeting card with a continue button.
    Intro,
    /// Tap-to-grow watering interaction.
    Watering,
    /// Sealed envelope and the cinematic wish.
    Envelope,
    /// The hero rose, clicked to bloom.
    Rose,
    /// Typewritten message and its follow-up lines.
    Message,
    /// Captioned pages turned one by one.
    Flipbook,
    /// Heart overlay animation.
    Hearts,
    /// Closing memory card. Final.
    Memory,
}

impl Stage {
    /// Every stage in the order the experience visits them.
    pub const ORDER: [Stage; 8] = [
        Stage::Intro,
        Stage::Watering,
        Stage::Envelope,
        Stage::Rose,
        Stage::Message,
        Stage::Flipbook,
        Stage::Hearts,
        Stage::Memory,
    ];

    /// The initial stage.
    #[must_use]
    pub const fn first() -> Self {
        Self::ORDER[0]
    }

    /// Zero-based position in [`Self::ORDER`].
    #[must_use]
    pub fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|stage| *stage == self)
            .unwrap_or_default()
    }

    /// The stage that follows this one, or `None` for the final stage.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ORDER.get(self.position() + 1).copied()
    }

    /// Returns `true` for the last stage of the order.
    #[must_use]
    pub fn is_final(self) -> bool {
        self.next().is_none()
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Intro => "intro",
            Stage::Watering => "watering",
            Stage::Envelope => "envelope",
            Stage::Rose => "rose",
            Stage::Message => "message",
            Stage::Flipbook => "flipbook",
            Stage::Hearts => "hearts",
            Stage::Memory => "memory",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
