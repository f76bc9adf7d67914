use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::image_pipeline::common::error::{DemosaicError, Result};

/// Rayon pool the row passes run on. Without a thread count the global
/// pool is used.
#[derive(Debug)]
pub struct WorkerPool {
    pool: Option<ThreadPool>,
}

impl WorkerPool {
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let pool = match threads {
            None => None,
            Some(n) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("demosaic-{i}"))
                    .build()
                    .map_err(|e| DemosaicError::ThreadPool(e.to_string()))?,
            ),
        };
        Ok(Self { pool })
    }

    /// Run `op` with this pool as the current rayon pool.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    pub fn current_num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}
