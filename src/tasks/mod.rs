//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Clean: throttled purge of expired entries

mod clean;

pub use clean::spawn_clean_task;
