//! Test clock — deterministic `Clock` implementation for tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rosebloom_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A shared `FixedClock` pinned to the Unix epoch, for callers that only
/// need some clock.
#[must_use]
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(Utc.timestamp_opt(0, 0).single().unwrap_or_default()))
}
