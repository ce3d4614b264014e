//! Executor trait for fanning out independent work items.
//!
//! The layout core itself never spawns threads. Export hands its per-slot
//! rasterization work to an `Executor`, which decides whether the items run
//! sequentially or on a thread pool.

/// Runs a batch of independent jobs and returns their results in input order.
pub trait Executor: Send + Sync {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    /// Number of jobs that may run at the same time.
    fn parallelism(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Runs every job on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}
