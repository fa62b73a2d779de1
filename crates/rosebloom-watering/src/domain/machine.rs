//! The tap-to-grow state machine.

use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{TimerHandle, TimerQueue};
use serde::Serialize;
use tracing::{debug, info};

use super::progress::{MAX_PROGRESS, message_index, progress_for_taps};

/// Growth phase. `Bloomed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WateringPhase {
    /// Progress is below the maximum; taps are accepted.
    Growing,
    /// Progress reached the maximum; taps are rejected.
    Bloomed,
}

/// Result of delivering a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tap was accepted and the plant grew.
    Watered {
        /// Accepted taps so far.
        tap_count: u32,
        /// Progress after this tap.
        progress: u32,
    },
    /// The tap was accepted and progress reached the maximum; the settle
    /// delay has started.
    Bloomed {
        /// Accepted taps so far.
        tap_count: u32,
    },
    /// The machine is already bloomed; nothing changed.
    Rejected,
}

/// Result of delivering a fired timer to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The timer is not the machine's settle timer.
    Foreign,
    /// The settle delay elapsed; the stage is complete. Reported once.
    Settled,
}

/// Bounded progress counter driven by taps.
///
/// Progress is always `min(tap_count * 20, 100)`. The tap that reaches 100
/// moves the machine to [`WateringPhase::Bloomed`] and starts a one-step run
/// that fires the settle effect after the configured delay.
#[derive(Debug)]
pub struct WateringMachine<E> {
    tap_count: u32,
    phase: WateringPhase,
    message_count: usize,
    settle_run: Sequence<E>,
    settle: Sequencer,
}

impl<E: Clone> WateringMachine<E> {
    /// Creates a machine at zero progress.
    #[must_use]
    pub fn new(message_count: usize, settle_delay_ms: u64, settle_effect: E) -> Self {
        Self {
            tap_count: 0,
            phase: WateringPhase::Growing,
            message_count,
            settle_run: Sequence::once(settle_delay_ms, settle_effect),
            settle: Sequencer::new("watering.settle"),
        }
    }

    /// Applies one tap.
    pub fn tap(&mut self, queue: &mut TimerQueue<E>) -> TapOutcome {
        match self.phase {
            WateringPhase::Bloomed => {
                debug!(tap_count = self.tap_count, "tap rejected, already bloomed");
                TapOutcome::Rejected
            }
            WateringPhase::Growing => {
                self.tap_count += 1;
                let progress = self.progress();
                if progress < MAX_PROGRESS {
                    debug!(tap_count = self.tap_count, progress, "watered");
                    return TapOutcome::Watered {
                        tap_count: self.tap_count,
                        progress,
                    };
                }

                self.phase = WateringPhase::Bloomed;
                self.settle.start(queue, &self.settle_run);
                info!(
                    tap_count = self.tap_count,
                    settle_ms = self.settle_run.duration_ms(),
                    "rose bloomed"
                );
                TapOutcome::Bloomed {
                    tap_count: self.tap_count,
                }
            }
        }
    }
}

impl<E> WateringMachine<E> {
    /// Delivers a fired timer.
    pub fn on_timer(&mut self, handle: TimerHandle) -> SettleOutcome {
        match self.settle.acknowledge(handle) {
            StepOutcome::Finished => SettleOutcome::Settled,
            StepOutcome::Fired | StepOutcome::Foreign => SettleOutcome::Foreign,
        }
    }

    /// Cancels the settle timer if pending. Returns how many timers were cancelled.
    pub fn teardown(&mut self, queue: &mut TimerQueue<E>) -> usize {
        self.settle.teardown(queue)
    }

    /// Accepted taps so far.
    #[must_use]
    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    /// Current progress in `[0, 100]`.
    #[must_use]
    pub fn progress(&self) -> u32 {
        progress_for_taps(self.tap_count)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> WateringPhase {
        self.phase
    }

    /// Returns `true` while the settle delay is pending.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settle.is_running()
    }

    /// Index of the message matching the current progress.
    #[must_use]
    pub fn message_index(&self) -> usize {
        message_index(self.progress(), self.message_count)
    }

    /// Number of authored messages this machine indexes into.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.message_count
    }
}
