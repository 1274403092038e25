//! In-process parallel word-frequency pipeline.
//!
//! A [`Coordinator`] fetches a corpus, tokenizes it, fans the map stage out
//! over a fixed [`WorkerPool`] writing into a sharded [`Shuffle`], fans the
//! reduce stage out over the same pool and ranks the resulting counts.
//!
//! ```no_run
//! # async fn demo() -> parallel::Result<()> {
//! use parallel::{CancelToken, Coordinator};
//!
//! let coordinator = Coordinator::with_defaults()?;
//! let top = coordinator
//!     .run("https://www.gutenberg.org/cache/epub/1342/pg1342.txt", 10, &CancelToken::new())
//!     .await?;
//! for count in &top {
//!     println!("{} {}", count.word, count.total);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod pool;
pub mod render;
pub mod shuffle;
pub mod stages;

pub use cancel::CancelToken;
pub use config::PipelineConfig;
pub use coordinator::Coordinator;
pub use error::{FetchError, PipelineError, Result};
pub use fetch::{Fetch, Source, SourceFetcher};
pub use logging::init_logger;
pub use pool::WorkerPool;
pub use shuffle::Shuffle;
