//! TaskPool - bounded-concurrency task runner
//!
//! TaskPool accepts a dynamically growing collection of asynchronous work
//! items, runs at most `capacity` of them at a time, and records each
//! outcome in a result map keyed by an explicit name or by dequeue-order
//! index. Once the caller signals that no more work will arrive, a one-shot
//! completion notification delivers the full result map exactly once.
//!
//! # Core Concepts
//!
//! - **Bounded admission**: tasks are admitted strictly FIFO, never more
//!   than `capacity` in flight at once
//! - **Keyed results**: explicit keys and positional indexes share one map,
//!   so callers recover positional correspondence despite out-of-order
//!   completion
//! - **Failures are data**: a failing task's error is stored as its result;
//!   sibling tasks and the pool itself are unaffected
//! - **Explicit close**: quiescence alone never completes the pool - the
//!   caller must close submission first
//!
//! # Modules
//!
//! - [`pool`] - the pool itself: admission loop, completion contract,
//!   configuration, and result types

pub mod pool;

// Re-export commonly used types
pub use pool::{PoolConfig, PoolError, PoolStats, PoolStatus, ResultMap, Task, TaskKey, TaskOutcome, TaskPool};
