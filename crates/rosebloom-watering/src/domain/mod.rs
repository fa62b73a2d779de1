//! Domain model for the Watering context.

pub mod machine;
pub mod progress;
