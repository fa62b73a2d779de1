//! Rosebloom — Stage Orchestration bounded context.
//!
//! Responsible for the ordered stage list, the authored content and pacing of
//! every stage, the per-stage runtimes that own their timers, and the stage
//! controller that advances exactly one live stage at a time.

pub mod application;
pub mod domain;
