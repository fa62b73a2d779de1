//! Domain model for the Stage Orchestration context.

pub mod commands;
pub mod content;
pub mod effects;
pub mod events;
pub mod runtime;
pub mod stage;
pub mod storyboard;
pub mod timing;
