use anyhow::Context;
use clap::Parser;
use common::{map, rank, reduce, Tokenizer};
use itertools::Itertools;
use std::{
    fs::{read_to_string, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(short, long, default_value = "wf-seq")]
    output: PathBuf,
    /// Also print the N most frequent words
    #[arg(short = 'n', long)]
    top: Option<usize>,
    #[arg(required = true)]
    input_files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let tokenizer = Tokenizer::new();

    let mut intermediate = Vec::new();
    for file in &cli.input_files {
        let contents =
            read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
        intermediate.extend(tokenizer.normalize(&contents).tokens().map(map));
    }

    let counts = sequential::shuffle(intermediate)
        .into_iter()
        .map(reduce)
        .collect_vec();

    let output = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let mut output = BufWriter::new(output);
    for count in &counts {
        writeln!(output, "{} {}", count.word, count.total)?;
    }
    output.flush()?;

    if let Some(n) = cli.top {
        for count in rank(counts, n) {
            println!("{:>8} {}", count.total, count.word);
        }
    }

    Ok(())
}
