use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Terminal outcome of a failed pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("acquisition failed: {0}")]
    Acquisition(#[from] FetchError),

    #[error("run cancelled")]
    Cancelled,

    /// Rejected before any work started
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Failure reported by a corpus fetcher. Never retried by the pipeline.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0} is unreachable: {1}")]
    Unreachable(String, String),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{0} is not valid UTF-8: {1}")]
    Decode(String, String),

    #[error("no response within {0:?}")]
    TimedOut(Duration),
}
