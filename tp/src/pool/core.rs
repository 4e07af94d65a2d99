//! Pool implementation

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use super::config::PoolConfig;
use super::error::PoolError;
use super::status::{PoolStats, PoolStatus};
use super::task::{ResultMap, Task, TaskKey, TaskOutcome};

/// Internal state protected by mutex
struct PoolInner<T> {
    /// Tasks waiting for a slot, FIFO
    pending: VecDeque<Task<T>>,

    /// Actions currently executing
    in_flight: usize,

    /// Next auto-assigned index; advances once per dequeued task,
    /// keyed or not
    next_index: u64,

    /// Whether `close` has been called
    closed: bool,

    /// Accumulated outcomes, moved out when completion fires
    results: ResultMap<T>,

    /// One-shot completion delivery; `take`n exactly once when the pool
    /// is closed and quiescent
    completion_tx: Option<oneshot::Sender<ResultMap<T>>>,

    /// Receiver half, claimed by the first `on_complete` or `join`
    completion_rx: Option<oneshot::Receiver<ResultMap<T>>>,

    /// Statistics
    stats: PoolStats,
}

/// Shared pool core: capacity plus the mutex-guarded state
struct PoolShared<T> {
    capacity: usize,
    inner: Mutex<PoolInner<T>>,
}

/// The TaskPool runs submitted asynchronous tasks with FIFO admission and
/// a hard concurrency limit, recording each outcome under an explicit or
/// positional key.
///
/// The pool is a cheap cloneable handle over shared state, so producers
/// and the party that closes submission can live on different tasks. All
/// state is mutated only inside the admission pass and the completion
/// continuation, under one mutex.
pub struct TaskPool<T> {
    shared: Arc<PoolShared<T>>,
}

impl<T> Clone for TaskPool<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> TaskPool<T> {
    /// Create a pool with the given concurrency capacity
    ///
    /// Fails fast on zero capacity: such a pool could never drain its
    /// queue, deadlocking the completion contract.
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        Self::with_config(PoolConfig::new(capacity))
    }

    /// Create a pool from a configuration
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        debug!(?config, "TaskPool::with_config: called");
        config.validate()?;

        let (completion_tx, completion_rx) = oneshot::channel();
        Ok(Self {
            shared: Arc::new(PoolShared {
                capacity: config.capacity,
                inner: Mutex::new(PoolInner {
                    pending: VecDeque::new(),
                    in_flight: 0,
                    next_index: 0,
                    closed: false,
                    results: ResultMap::new(),
                    completion_tx: Some(completion_tx),
                    completion_rx: Some(completion_rx),
                    stats: PoolStats::default(),
                }),
            }),
        })
    }

    /// The configured concurrency capacity
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Append tasks to the pending queue and run the admission pass
    ///
    /// Batch order is preserved, and batches are concatenated onto the
    /// queue tail in call order. Tasks begin executing before this
    /// returns if capacity allows; the rest wait for slots to free up.
    /// Rejects the whole batch once submission has been closed.
    pub async fn submit(&self, tasks: Vec<Task<T>>) -> Result<(), PoolError> {
        debug!(count = tasks.len(), "TaskPool::submit: called");
        let mut inner = self.shared.inner.lock().await;

        if inner.closed {
            debug!("TaskPool::submit: submission closed, rejecting batch");
            return Err(PoolError::SubmissionClosed);
        }

        inner.stats.total_submitted += tasks.len() as u64;
        inner.pending.extend(tasks);
        inner.stats.peak_queue_depth = inner.stats.peak_queue_depth.max(inner.pending.len());

        self.admit(&mut inner);
        Ok(())
    }

    /// Declare that no further `submit` calls will occur
    ///
    /// Idempotent. Never forces or cancels outstanding work: if tasks are
    /// still queued or running, completion waits for them to drain
    /// through the normal path.
    pub async fn close(&self) {
        debug!("TaskPool::close: called");
        let mut inner = self.shared.inner.lock().await;

        if inner.closed {
            debug!("TaskPool::close: already closed");
            return;
        }

        inner.closed = true;
        self.maybe_complete(&mut inner);
    }

    /// Register the completion callback
    ///
    /// The callback receives the full result map exactly once, only after
    /// `close` has been called and the pool has drained to quiescence. If
    /// `close` is never called the callback never fires - the pool cannot
    /// tell "temporarily empty" from "done" without the explicit signal.
    pub async fn on_complete<F>(&self, callback: F) -> Result<(), PoolError>
    where
        F: FnOnce(ResultMap<T>) + Send + 'static,
    {
        debug!("TaskPool::on_complete: called");
        let rx = {
            let mut inner = self.shared.inner.lock().await;
            inner.completion_rx.take().ok_or(PoolError::CompletionClaimed)?
        };

        tokio::spawn(async move {
            match rx.await {
                Ok(results) => {
                    debug!(entries = results.len(), "TaskPool::on_complete: invoking callback");
                    callback(results);
                }
                Err(_) => debug!("TaskPool::on_complete: pool dropped before completion"),
            }
        });

        Ok(())
    }

    /// Await completion, returning the full result map
    ///
    /// Future-style alternative to [`on_complete`](Self::on_complete);
    /// the two share the same one-shot delivery, so only the first caller
    /// of either gets it. Never resolves if `close` is never called.
    pub async fn join(&self) -> Result<ResultMap<T>, PoolError> {
        debug!("TaskPool::join: called");
        let rx = {
            let mut inner = self.shared.inner.lock().await;
            inner.completion_rx.take().ok_or(PoolError::CompletionClaimed)?
        };

        rx.await.map_err(|_| PoolError::ChannelClosed)
    }

    /// Get a point-in-time snapshot of pool state
    pub async fn status(&self) -> PoolStatus {
        debug!("TaskPool::status: called");
        let inner = self.shared.inner.lock().await;

        PoolStatus {
            in_flight: inner.in_flight,
            pending: inner.pending.len(),
            closed: inner.closed,
            stats: inner.stats.clone(),
        }
    }

    /// The admission pass: move tasks from pending to running while
    /// capacity allows
    ///
    /// Runs entirely under the state lock, so no two passes can dequeue
    /// the same task or double-count `in_flight`. Launches are
    /// fire-and-forget; each launched action re-enters through
    /// [`finish`](Self::finish) when it resolves.
    fn admit(&self, inner: &mut PoolInner<T>) {
        while inner.in_flight < self.shared.capacity {
            let Some(task) = inner.pending.pop_front() else {
                break;
            };

            // Explicit key wins; the index counter advances either way
            let key = task.key.unwrap_or(TaskKey::Index(inner.next_index));
            inner.next_index += 1;

            // A no-op entry reserves its slot immediately without
            // consuming execution capacity
            let Some(action) = task.action else {
                debug!(%key, "TaskPool::admit: no-op entry, recording empty outcome");
                inner.results.insert(key, TaskOutcome::Empty);
                continue;
            };

            inner.in_flight += 1;
            inner.stats.total_dispatched += 1;
            inner.stats.peak_in_flight = inner.stats.peak_in_flight.max(inner.in_flight);
            debug!(%key, in_flight = inner.in_flight, "TaskPool::admit: launching task");

            let pool = self.clone();
            tokio::spawn(async move {
                let outcome = match action().await {
                    Ok(value) => TaskOutcome::Success(value),
                    Err(report) => TaskOutcome::Failure(report),
                };
                pool.finish(key, outcome).await;
            });
        }
    }

    /// Completion continuation: record an outcome, free the slot, and
    /// re-run the admission pass
    async fn finish(&self, key: TaskKey, outcome: TaskOutcome<T>) {
        let mut inner = self.shared.inner.lock().await;
        debug!(%key, failed = outcome.is_failure(), "TaskPool::finish: recording outcome");

        if outcome.is_failure() {
            inner.stats.total_failed += 1;
        }
        inner.stats.total_completed += 1;

        // Last write wins on a duplicated key
        inner.results.insert(key, outcome);
        inner.in_flight -= 1;

        self.admit(&mut inner);
        self.maybe_complete(&mut inner);
    }

    /// Fire the completion notification if submission is closed and the
    /// pool is quiescent
    ///
    /// Exactly-once is structural: the sender is `take`n, so re-checks
    /// after later state changes find it already gone.
    fn maybe_complete(&self, inner: &mut PoolInner<T>) {
        if !inner.closed || inner.in_flight > 0 || !inner.pending.is_empty() {
            return;
        }

        if let Some(tx) = inner.completion_tx.take() {
            let results = std::mem::take(&mut inner.results);
            debug!(entries = results.len(), "TaskPool::maybe_complete: firing completion");
            // Receiver may be unclaimed or dropped; the value is buffered
            // in the channel either way
            let _ = tx.send(results);
        }
    }
}
