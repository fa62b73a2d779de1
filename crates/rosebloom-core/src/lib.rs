//! Rosebloom Core — sequencing primitives.
//!
//! This crate defines the leaf building blocks every stage depends on: the
//! cancelable timer queue, the timed reveal sequencer, the typewriter engine,
//! and the shared event and error types. It contains no authored content.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod sequence;
pub mod timer;
pub mod typewriter;
