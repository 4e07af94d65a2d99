//! Pool errors
//!
//! Task-level failures are not errors from the pool's point of view - they
//! are captured as [`TaskOutcome::Failure`](super::TaskOutcome) values. The
//! errors here are caller mistakes against the pool's own protocol.

use thiserror::Error;

/// Errors from pool operations
#[derive(Debug, Error)]
pub enum PoolError {
    /// A zero-capacity pool could never drain its queue
    #[error("Invalid capacity: {0} (must be positive)")]
    InvalidCapacity(usize),

    /// Submission was already closed when `submit` was called
    #[error("Submission closed: no further tasks may be accepted")]
    SubmissionClosed,

    /// The completion notification was already claimed by a previous
    /// `on_complete` or `join` call
    #[error("Completion already claimed")]
    CompletionClaimed,

    /// The completion channel closed without delivering results
    #[error("Completion channel closed")]
    ChannelClosed,
}
