//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Janitor: sweeps expired entries out of every named cache

mod janitor;

pub use janitor::{spawn_janitor, sweep};
