//! Application services for the Watering context.

pub mod query_handlers;
