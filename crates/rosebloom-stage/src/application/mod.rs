//! Application services for the Stage Orchestration context.

pub mod controller;
pub mod query_handlers;
