//! Pure views derived from watering progress.
//!
//! Everything here is a function of a single progress value so renderers can
//! compute it without touching the machine.

use serde::Serialize;

/// Progress gained per accepted tap.
pub const PROGRESS_PER_TAP: u32 = 20;

/// Progress at which the rose blooms.
pub const MAX_PROGRESS: u32 = 100;

/// Taps needed to reach [`MAX_PROGRESS`].
pub const TAPS_TO_BLOOM: u32 = MAX_PROGRESS / PROGRESS_PER_TAP;

/// Stem height in display units at full progress.
pub const STEM_MAX_HEIGHT: f64 = 180.0;

const FIRST_GROWTH_THRESHOLD: u32 = 40;
const SECOND_GROWTH_THRESHOLD: u32 = 60;
const THIRD_GROWTH_THRESHOLD: u32 = 80;

/// Progress after `tap_count` accepted taps.
#[must_use]
pub fn progress_for_taps(tap_count: u32) -> u32 {
    tap_count.saturating_mul(PROGRESS_PER_TAP).min(MAX_PROGRESS)
}

/// Index of the message to show, clamped to the last message.
///
/// Returns zero when there are no messages.
#[must_use]
pub fn message_index(progress: u32, message_count: usize) -> usize {
    let step = (progress / PROGRESS_PER_TAP) as usize;
    step.min(message_count.saturating_sub(1))
}

/// Stem height proportional to progress.
#[must_use]
pub fn stem_height(progress: u32) -> f64 {
    f64::from(progress.min(MAX_PROGRESS)) / f64::from(MAX_PROGRESS) * STEM_MAX_HEIGHT
}

/// Taps remaining before the bloom.
#[must_use]
pub fn taps_left(tap_count: u32) -> u32 {
    TAPS_TO_BLOOM.saturating_sub(tap_count)
}

/// Which decorative elements the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Decorations {
    /// Leaves along the stem, lowest threshold first.
    pub leaves: [bool; 3],
    /// Thorns along the stem, lowest threshold first.
    pub thorns: [bool; 3],
    /// The rose head has opened.
    pub bloom: bool,
}

/// Decorations visible at `progress`.
#[must_use]
pub fn decorations(progress: u32) -> Decorations {
    let grown = [
        progress >= FIRST_GROWTH_THRESHOLD,
        progress >= SECOND_GROWTH_THRESHOLD,
        progress >= THIRD_GROWTH_THRESHOLD,
    ];
    Decorations {
        leaves: grown,
        thorns: grown,
        bloom: progress >= MAX_PROGRESS,
    }
}
