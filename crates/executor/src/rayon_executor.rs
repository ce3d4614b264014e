//! Rayon-based parallel executor.

use cardgrid_traits::Executor;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::sync::Arc;

/// Rasterizes on rayon's work-stealing threads.
///
/// [`RayonExecutor::new`] shares the global pool. [`RayonExecutor::with_threads`]
/// owns a dedicated pool so an export can be capped below the machine's
/// core count without touching the global one.
///
/// Results come back in input order: `Vec`'s parallel iterator is indexed.
#[derive(Debug, Clone)]
pub struct RayonExecutor {
    pool: Option<Arc<ThreadPool>>,
}

impl RayonExecutor {
    pub fn new() -> Self {
        Self { pool: None }
    }

    pub fn with_threads(num_threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .thread_name(|i| format!("cardgrid-raster-{i}"))
            .build()?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }
}

impl Default for RayonExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for RayonExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.into_par_iter().map(f).collect()),
            None => items.into_par_iter().map(f).collect(),
        }
    }

    fn parallelism(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }

    fn name(&self) -> &'static str {
        if self.pool.is_some() { "RayonExecutor(dedicated)" } else { "RayonExecutor" }
    }
}
