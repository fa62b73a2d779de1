//! Authored pacing, in milliseconds.
//!
//! Offsets inside one run are absolute from the run start.

// Intro card reveal.
pub const INTRO_CARD_MS: u64 = 300;
pub const INTRO_ROSE_MS: u64 = 500;
pub const INTRO_TITLE_MS: u64 = 600;
pub const INTRO_DIVIDER_MS: u64 = 800;
pub const INTRO_SUBTITLE_MS: u64 = 900;
pub const INTRO_BUTTON_MS: u64 = 1_200;

/// Pause after the bloom so the last watering message stays legible.
pub const WATERING_SETTLE_MS: u64 = 3_000;

// Envelope, before and after opening.
pub const ENVELOPE_HEADING_MS: u64 = 300;
pub const ENVELOPE_TAP_HINT_MS: u64 = 600;
pub const LETTER_SALUTATION_MS: u64 = 300;
pub const LETTER_BODY_MS: u64 = 600;
pub const ENVELOPE_BUTTON_MS: u64 = 1_000;

// Cinematic wish played from the envelope.
pub const CINEMATIC_TITLE_SHOW_MS: u64 = 0;
pub const CINEMATIC_TITLE_HIDE_MS: u64 = 3_000;
pub const CINEMATIC_DEDICATION_SHOW_MS: u64 = 3_500;
pub const CINEMATIC_DEDICATION_HIDE_MS: u64 = CINEMATIC_DEDICATION_SHOW_MS + 4_000;
pub const CINEMATIC_OVERLAY_FADE_MS: u64 = CINEMATIC_DEDICATION_HIDE_MS + 500;
pub const CINEMATIC_COMPLETE_MS: u64 = CINEMATIC_OVERLAY_FADE_MS + 1_500;

// Hero rose.
pub const ROSE_TITLE_MS: u64 = 300;
pub const ROSE_SHAKE_MS: u64 = 700;

// Message.
pub const TYPEWRITER_TICK_MS: u64 = 50;
pub const THANK_YOU_MS: u64 = 0;
pub const SECONDARY_LINE_MS: u64 = 1_000;
pub const CLOSING_LINE_MS: u64 = 13_000;
pub const KEEP_ROSE_BUTTON_MS: u64 = 13_500;

/// Page turn animation; further turns are ignored until it settles.
pub const FLIPBOOK_TURN_MS: u64 = 600;

/// How long the heart overlay plays before the memory stage.
pub const HEARTS_DURATION_MS: u64 = 4_000;

// Memory.
pub const MEMORY_FIRST_LINE_MS: u64 = 0;
pub const MEMORY_SECOND_LINE_MS: u64 = 1_500;
pub const MEMORY_CARD_MS: u64 = 3_000;

/// Footer caption, measured from controller start.
pub const FOOTER_MS: u64 = 3_000;
