//! Cancelable one-shot timers on virtual time.
//!
//! A [`TimerQueue`] owns every pending timer of one controller. Effects are
//! plain tags of type `E`; the queue never runs code itself; the owner pops
//! due timers one at a time and dispatches their tags. Popping one timer at a
//! time is what lets a cancellation issued while dispatching an effect win
//! over a timer that is due at the same instant.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, trace};

/// Opaque token for one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Returns the raw identifier, stable for the lifetime of the queue.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A timer that has reached its deadline and been removed from the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    /// The handle returned when the timer was scheduled.
    pub handle: TimerHandle,
    /// The virtual time the timer was due.
    pub at_ms: u64,
    /// The effect tag to dispatch.
    pub effect: E,
}

/// Pending one-shot timers ordered by deadline, ties broken by schedule order.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<(u64, u64), E>,
    deadlines: HashMap<u64, u64>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    /// Creates an empty queue at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Returns the current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedules `effect` to become due `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: u64, effect: E) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let deadline = self.now_ms.saturating_add(delay_ms);
        self.pending.insert((deadline, id), effect);
        self.deadlines.insert(id, deadline);
        trace!(timer = id, deadline_ms = deadline, "timer scheduled");
        TimerHandle(id)
    }

    /// Cancels a pending timer.
    ///
    /// Returns `false` when the timer already fired or was already cancelled;
    /// cancelling twice is harmless.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => {
                self.pending.remove(&(deadline, handle.0));
                trace!(timer = handle.0, deadline_ms = deadline, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the timer is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Removes and returns the earliest timer due at or before `horizon_ms`,
    /// moving the current time to its deadline.
    pub fn pop_due(&mut self, horizon_ms: u64) -> Option<Fired<E>> {
        let entry = self.pending.first_entry()?;
        let (deadline, id) = *entry.key();
        if deadline > horizon_ms {
            return None;
        }
        let effect = entry.remove();
        self.deadlines.remove(&id);
        self.now_ms = self.now_ms.max(deadline);
        debug!(timer = id, at_ms = deadline, "timer fired");
        Some(Fired {
            handle: TimerHandle(id),
            at_ms: deadline,
            effect,
        })
    }

    /// Moves the current time forward to `horizon_ms`. Time never goes back.
    ///
    /// Callers drain [`Self::pop_due`] up to the same horizon first.
    pub fn advance_to(&mut self, horizon_ms: u64) {
        self.now_ms = self.now_ms.max(horizon_ms);
    }
}

/// The handles owned by one runtime, cancelled together on teardown.
#[derive(Debug, Default)]
pub struct TimerSet {
    handles: Vec<TimerHandle>,
}

impl TimerSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records ownership of a scheduled timer.
    pub fn track(&mut self, handle: TimerHandle) {
        self.handles.push(handle);
    }

    /// Drops ownership of a timer that has fired. Returns `false` if the
    /// handle was not owned by this set.
    pub fn forget(&mut self, handle: TimerHandle) -> bool {
        match self.handles.iter().position(|h| *h == handle) {
            Some(index) => {
                self.handles.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the handle is owned by this set.
    #[must_use]
    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.handles.contains(&handle)
    }

    /// Number of owned handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if no handle is owned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Cancels every owned timer and clears the set. Returns how many were
    /// still pending.
    pub fn cancel_all<E>(&mut self, queue: &mut TimerQueue<E>) -> usize {
        self.handles
            .drain(..)
            .filter(|handle| queue.cancel(*handle))
            .count()
    }
}
