//! Bounded-concurrency task pool
//!
//! Manages task execution with FIFO admission, a concurrency limit, keyed
//! result collection, and an exactly-once completion notification in a
//! single component.

mod config;
mod core;
mod error;
mod status;
mod task;

pub use config::PoolConfig;
pub use core::TaskPool;
pub use error::PoolError;
pub use status::{PoolStats, PoolStatus};
pub use task::{ResultMap, Task, TaskKey, TaskOutcome};
