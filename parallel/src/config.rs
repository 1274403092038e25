use std::{num::NonZeroUsize, thread, time::Duration};

use crate::error::{PipelineError, Result};

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_CHUNK_SIZE: usize = 4096;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Knobs of a [`Coordinator`](crate::Coordinator). The requested top-N is part
/// of each run, not of the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Size of the worker pool shared by the map and reduce stages
    pub workers: usize,
    /// Tokens per map unit, buckets per reduce unit
    pub chunk_size: usize,
    pub fetch_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            chunk_size: DEFAULT_CHUNK_SIZE,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(PipelineError::InvalidRequest(
                "worker pool needs at least one worker".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(PipelineError::InvalidRequest(
                "chunk size must be positive".into(),
            ));
        }
        if self.fetch_timeout.is_zero() {
            return Err(PipelineError::InvalidRequest(
                "fetch timeout must be positive".into(),
            ));
        }
        Ok(())
    }
}
