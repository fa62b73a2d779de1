//! Rosebloom — Watering bounded context.
//!
//! Responsible for the tap-to-grow interaction: the bounded progress counter,
//! its terminal bloom state, the settle delay before the stage completes, and
//! the pure views a renderer derives from progress.

pub mod application;
pub mod domain;
