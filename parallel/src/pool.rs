use std::{num::NonZeroUsize, panic, thread};

use crossbeam_queue::SegQueue;
use itertools::Itertools;
use tracing::debug;

use crate::{
    cancel::CancelToken,
    error::{PipelineError, Result},
};

/// A fixed number of workers, reused by every stage of a run.
///
/// Each [`WorkerPool::execute`] call is a fan-out/fan-in barrier: units go into
/// a shared queue, workers drain it, and the call returns only after every
/// worker has been joined. Threads are scoped to the call, so nothing outlives
/// the stage that spawned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    size: NonZeroUsize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Result<Self> {
        let size = NonZeroUsize::new(size).ok_or_else(|| {
            PipelineError::InvalidRequest("worker pool needs at least one worker".into())
        })?;
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// Applies `work` to every unit. Results come back in no particular order.
    ///
    /// Workers check `cancel` before taking each unit; once it is set the whole
    /// stage fails with [`PipelineError::Cancelled`] and finished results are
    /// dropped.
    pub fn execute<T, R, F>(
        &self,
        stage: &str,
        units: Vec<T>,
        cancel: &CancelToken,
        work: F,
    ) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
    {
        let total = units.len();
        let queue = SegQueue::new();
        for unit in units {
            queue.push(unit);
        }
        let workers = self.size().min(total);
        debug!(stage, units = total, workers, "stage started");

        let outputs = thread::scope(|scope| {
            let handles = (0..workers)
                .map(|_| scope.spawn(|| drain(&queue, cancel, &work)))
                .collect_vec();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect_vec()
        });

        if cancel.is_cancelled() {
            debug!(stage, "stage cancelled");
            return Err(PipelineError::Cancelled);
        }
        let mut results = Vec::with_capacity(total);
        for output in outputs {
            results.extend(output?);
        }
        debug!(stage, "stage done");
        Ok(results)
    }
}

fn drain<T, R, F>(queue: &SegQueue<T>, cancel: &CancelToken, work: &F) -> Result<Vec<R>>
where
    F: Fn(T) -> R,
{
    let mut results = Vec::new();
    while let Some(unit) = queue.pop() {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        results.push(work(unit));
    }
    Ok(results)
}
