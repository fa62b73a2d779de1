//! Query handlers for the Watering context.
//!
//! This module builds the read-only view a renderer needs from the machine
//! state.

use serde::Serialize;

use crate::domain::machine::{WateringMachine, WateringPhase};
use crate::domain::progress::{Decorations, decorations, stem_height, taps_left};

/// Read-only view of the watering machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WateringView {
    /// Progress in `[0, 100]`.
    pub progress: u32,
    /// Accepted taps.
    pub tap_count: u32,
    /// Taps remaining before the bloom.
    pub taps_left: u32,
    /// Index into the authored watering messages.
    pub message_index: usize,
    /// Stem height in display units.
    pub stem_height: f64,
    /// Decorative elements to show.
    pub decorations: Decorations,
    /// Growth phase.
    pub phase: WateringPhase,
    /// The settle delay is running.
    pub settling: bool,
}

/// Builds the view for `machine`.
#[must_use]
pub fn watering_view<E>(machine: &WateringMachine<E>) -> WateringView {
    let progress = machine.progress();
    WateringView {
        progress,
        tap_count: machine.tap_count(),
        taps_left: taps_left(machine.tap_count()),
        message_index: machine.message_index(),
        stem_height: stem_height(progress),
        decorations: decorations(progress),
        phase: machine.phase(),
        settling: machine.is_settling(),
    }
}
