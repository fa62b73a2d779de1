//! Drives a bare `TimerQueue` the way a controller would.

use rosebloom_core::timer::{Fired, TimerQueue};

/// Pops every timer due at or before `horizon_ms`, in order, and moves the
/// queue's time to `horizon_ms`.
///
/// Only for code under test that does not react to its own timers; anything
/// that cancels or schedules while dispatching must be driven one
/// `pop_due` at a time.
pub fn drain_due<E>(queue: &mut TimerQueue<E>, horizon_ms: u64) -> Vec<Fired<E>> {
    let mut fired = Vec::new();
    while let Some(timer) = queue.pop_due(horizon_ms) {
        fired.push(timer);
    }
    queue.advance_to(horizon_ms);
    fired
}
