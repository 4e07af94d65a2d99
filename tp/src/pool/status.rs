//! Pool observability snapshots

/// Counters accumulated over the pool's lifetime
#[derive(Debug, Default, Clone)]
pub struct PoolStats {
    /// Tasks accepted by `submit`, including no-op entries
    pub total_submitted: u64,
    /// Tasks actually launched (no-op entries excluded)
    pub total_dispatched: u64,
    /// Launched tasks that resolved, successfully or not
    pub total_completed: u64,
    /// Launched tasks that resolved with an error
    pub total_failed: u64,
    /// High-water mark of concurrently running actions
    pub peak_in_flight: usize,
    /// High-water mark of the pending queue
    pub peak_queue_depth: usize,
}

/// Point-in-time snapshot of pool state
#[derive(Debug, Clone)]
pub struct PoolStatus {
    /// Actions currently executing
    pub in_flight: usize,
    /// Tasks waiting for a slot
    pub pending: usize,
    /// Whether submission has been closed
    pub closed: bool,
    /// Lifetime counters
    pub stats: PoolStats,
}

impl PoolStatus {
    /// True when nothing is queued and nothing is running
    pub fn is_quiescent(&self) -> bool {
        self.in_flight == 0 && self.pending == 0
    }
}
