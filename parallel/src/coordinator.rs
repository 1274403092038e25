use std::{num::NonZeroUsize, panic, time::Instant};

use common::{rank, Count, RankedList, Tokenizer};
use tokio::{task, time};
use tracing::{info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::{
    cancel::CancelToken,
    config::PipelineConfig,
    error::{FetchError, PipelineError, Result},
    fetch::{Fetch, Source, SourceFetcher},
    pool::WorkerPool,
    stages,
};

/// Owns a run end to end: acquisition, the map/shuffle/reduce stages on its
/// worker pool, and ranking.
///
/// This is the only place where acquisition failures and cancellation turn
/// into a failed run. A run yields either a complete [`RankedList`] or an
/// error, never a partial list.
#[derive(Debug)]
pub struct Coordinator<F = SourceFetcher> {
    config: PipelineConfig,
    pool: WorkerPool,
    chunk_size: NonZeroUsize,
    tokenizer: Tokenizer,
    fetcher: F,
}

impl Coordinator {
    pub fn with_defaults() -> Result<Self> {
        Self::new(PipelineConfig::default(), SourceFetcher::new())
    }
}

impl<F: Fetch> Coordinator<F> {
    pub fn new(config: PipelineConfig, fetcher: F) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.workers)?;
        let chunk_size = NonZeroUsize::new(config.chunk_size)
            .ok_or_else(|| PipelineError::InvalidRequest("chunk size must be positive".into()))?;
        Ok(Self {
            config,
            pool,
            chunk_size,
            tokenizer: Tokenizer::new(),
            fetcher,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validates a raw request and runs it. A negative `top_n` or an
    /// unusable `source` is rejected before anything is fetched.
    pub async fn run(&self, source: &str, top_n: i64, cancel: &CancelToken) -> Result<RankedList> {
        let top_n = usize::try_from(top_n).map_err(|_| {
            PipelineError::InvalidRequest(format!("top-n must not be negative, got {top_n}"))
        })?;
        let source: Source = source.parse()?;
        self.execute(&source, top_n, cancel).await
    }

    pub async fn execute(
        &self,
        source: &Source,
        top_n: usize,
        cancel: &CancelToken,
    ) -> Result<RankedList> {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id, %source);
        async move {
            let started = Instant::now();
            let text = self.acquire(source, cancel).await?;
            info!(bytes = text.len(), "corpus acquired");

            let counts = self.count(text, cancel).await?;
            let distinct = counts.len();
            let ranked = rank(counts, top_n);
            info!(
                distinct,
                ranked = ranked.len(),
                elapsed = ?started.elapsed(),
                "run finished"
            );
            Ok(ranked)
        }
        .instrument(span)
        .await
    }

    async fn acquire(&self, source: &Source, cancel: &CancelToken) -> Result<String> {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        let deadline = self.config.fetch_timeout;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PipelineError::Cancelled),
            fetched = time::timeout(deadline, self.fetcher.fetch(source, deadline)) => match fetched {
                Ok(text) => Ok(text?),
                Err(_) => Err(FetchError::TimedOut(deadline).into()),
            },
        }
    }

    /// Runs the CPU-bound stages off the async runtime.
    async fn count(&self, text: String, cancel: &CancelToken) -> Result<Vec<Count>> {
        let tokenizer = self.tokenizer.clone();
        let pool = self.pool;
        let chunk_size = self.chunk_size;
        let cancel = cancel.clone();
        let span = Span::current();

        let handle = task::spawn_blocking(move || {
            let _entered = span.enter();
            stages::count_words(&tokenizer, &text, &pool, chunk_size, &cancel)
        });
        match handle.await {
            Ok(counts) => counts,
            Err(e) if e.is_panic() => panic::resume_unwind(e.into_panic()),
            Err(_) => Err(PipelineError::Cancelled),
        }
    }
}
