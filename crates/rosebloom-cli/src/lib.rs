//! Rosebloom terminal front end.
//!
//! Parses one intent per input line, drives the stage controller on wall-clock
//! time and renders its view as text.

pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod render;
