//! Worker pool sizing.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::BuildError;

/// Lower bound on the default worker count.
const MIN_JOBS: usize = 4;

/// Default worker count: the number of logical CPUs, but at least four.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(MIN_JOBS)
}

/// Builds a dedicated pool with `jobs` worker threads (`None` for the
/// default). A request for zero workers is treated as one.
pub fn build_pool(jobs: Option<usize>) -> Result<ThreadPool, BuildError> {
    let threads = jobs.unwrap_or_else(default_jobs).max(1);
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("shade-worker-{i}"))
        .build()
        .map_err(|e| BuildError::ThreadPool(e.to_string()))
}
