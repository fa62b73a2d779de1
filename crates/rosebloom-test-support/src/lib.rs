//! Shared test mocks and utilities for Rosebloom.

mod clock;
mod timeline;

pub use clock::{FixedClock, fixed_clock};
pub use timeline::drain_due;
