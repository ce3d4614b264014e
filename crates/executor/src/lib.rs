//! Executor implementations for the cardgrid export pipeline.
//!
//! ## Available Executors
//!
//! - [`RayonExecutor`]: Work-stealing thread pool (feature: `rayon`)
//! - [`SyncExecutor`]: Sequential execution (re-exported from cardgrid-traits)

#[cfg(feature = "rayon")]
mod rayon_executor;

#[cfg(feature = "rayon")]
pub use rayon_executor::RayonExecutor;

pub use cardgrid_traits::{Executor, SyncExecutor};

/// The executor an export runs its rasterization on.
///
/// `Executor` has generic methods and cannot be a trait object, so the
/// concrete executors are collected here instead.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    Sync(SyncExecutor),
    #[cfg(feature = "rayon")]
    Rayon(RayonExecutor),
}

impl ExecutorImpl {
    pub fn sequential() -> Self {
        ExecutorImpl::Sync(SyncExecutor::new())
    }

    /// Picks an executor for a requested thread count.
    ///
    /// `None` gives the default executor and `Some(1)` runs sequentially.
    /// Without the `rayon` feature every request runs sequentially.
    pub fn with_threads(threads: Option<usize>) -> Self {
        match threads {
            None => Self::default(),
            Some(0 | 1) => Self::sequential(),
            #[cfg(feature = "rayon")]
            Some(n) => match RayonExecutor::with_threads(n) {
                Ok(executor) => ExecutorImpl::Rayon(executor),
                Err(e) => {
                    log::warn!("Could not start a {}-thread pool ({}), rasterizing sequentially", n, e);
                    Self::sequential()
                }
            },
            #[cfg(not(feature = "rayon"))]
            Some(n) => {
                log::warn!("Built without rayon; ignoring request for {} threads", n);
                Self::sequential()
            }
        }
    }
}

impl Executor for ExecutorImpl {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.execute_all(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.execute_all(items, f),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sync(exec) => exec.parallelism(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.parallelism(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sync(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.name(),
        }
    }
}

impl Default for ExecutorImpl {
    #[cfg(feature = "rayon")]
    fn default() -> Self {
        ExecutorImpl::Rayon(RayonExecutor::new())
    }

    #[cfg(not(feature = "rayon"))]
    fn default() -> Self {
        Self::sequential()
    }
}
