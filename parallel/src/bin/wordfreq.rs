use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use parallel::{
    config::{DEFAULT_CHUNK_SIZE, DEFAULT_TOP_N},
    init_logger,
    render::{BarChart, Json, Render},
    CancelToken, Coordinator, PipelineConfig, SourceFetcher,
};
use std::{io, process::ExitCode, time::Duration};
use tokio::{runtime, signal};
use tracing::warn;

/// Count the most frequent words of a text corpus.
#[derive(Parser, Debug)]
#[command(version, allow_negative_numbers = true)]
struct Cli {
    /// http(s) URL, file:// URL or local path of the corpus
    source: String,
    /// How many words to show
    #[arg(default_value_t = DEFAULT_TOP_N as i64)]
    top_n: i64,
    /// Worker threads for the map and reduce stages [default: available parallelism]
    #[arg(short, long)]
    workers: Option<usize>,
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    /// Acquisition deadline in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,
    /// Print JSON instead of a bar chart
    #[arg(long)]
    json: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = PipelineConfig::default()
        .with_chunk_size(cli.chunk_size)
        .with_fetch_timeout(Duration::from_secs(cli.timeout));
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    let coordinator = Coordinator::new(config, SourceFetcher::new())?;

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting tokio runtime")?;
    let list = runtime.block_on(async {
        let cancel = CancelToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                warn!("interrupted, cancelling run");
                on_interrupt.cancel();
            }
        });
        coordinator.run(&cli.source, cli.top_n, &cancel).await
    });
    let list = list.with_context(|| format!("counting words of {}", cli.source))?;

    let renderer: Box<dyn Render> = if cli.json {
        Box::new(Json)
    } else {
        Box::new(BarChart::default())
    };
    let shown = usize::try_from(cli.top_n).unwrap_or_default();
    renderer.render(&list, shown, &mut io::stdout().lock())?;
    Ok(())
}
