use std::num::NonZeroUsize;

use common::{map, reduce, Count, Tokenizer};
use itertools::Itertools;
use tracing::debug;

use crate::{cancel::CancelToken, error::Result, pool::WorkerPool, shuffle::Shuffle};

/// Tokenizes `raw`, then runs the map and reduce stages on `pool`.
///
/// Map units are runs of `chunk_size` tokens; each worker writes its pairs
/// straight into the shared [`Shuffle`]. Once every map unit is done the
/// shuffle is drained into buckets, which are cut into reduce units of the
/// same size. Counts come back in no particular order.
pub fn count_words(
    tokenizer: &Tokenizer,
    raw: &str,
    pool: &WorkerPool,
    chunk_size: NonZeroUsize,
    cancel: &CancelToken,
) -> Result<Vec<Count>> {
    let normalized = tokenizer.normalize(raw);
    let chunks = normalized.tokens().chunks(chunk_size.get());
    let map_units = chunks.into_iter().map(Itertools::collect_vec).collect_vec();

    let shuffle = Shuffle::new();
    pool.execute("map", map_units, cancel, |tokens| {
        shuffle.emit_all(tokens.into_iter().map(map))
    })?;
    let buckets = shuffle.into_buckets();
    debug!(distinct = buckets.len(), "shuffle drained");

    let chunks = buckets.into_iter().chunks(chunk_size.get());
    let reduce_units = chunks.into_iter().map(Itertools::collect_vec).collect_vec();
    let counts = pool.execute("reduce", reduce_units, cancel, |buckets| {
        buckets.into_iter().map(reduce).collect_vec()
    })?;

    Ok(counts.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use std::collections::HashMap;

    fn chunk(size: usize) -> NonZeroUsize {
        NonZeroUsize::new(size).unwrap()
    }

    fn totals(counts: Vec<Count>) -> HashMap<String, u64> {
        counts
            .into_iter()
            .map(|c| (c.word.into_string(), c.total))
            .collect()
    }

    #[test]
    fn test_counts_words() {
        let pool = WorkerPool::new(3).unwrap();
        let counts = count_words(
            &Tokenizer::new(),
            "The cat sat. The CAT sat! the end",
            &pool,
            chunk(2),
            &CancelToken::new(),
        )
        .unwrap();
        let totals = totals(counts);
        assert_eq!(totals.len(), 4);
        assert_eq!(totals["the"], 3);
        assert_eq!(totals["cat"], 2);
        assert_eq!(totals["sat"], 2);
        assert_eq!(totals["end"], 1);
    }

    #[test]
    fn test_empty_corpus() {
        let pool = WorkerPool::new(2).unwrap();
        let counts =
            count_words(&Tokenizer::new(), "", &pool, chunk(16), &CancelToken::new()).unwrap();
        assert!(counts.is_empty());
    }

    #[test]
    fn test_cancelled_before_start() {
        let pool = WorkerPool::new(2).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = count_words(&Tokenizer::new(), "a b c", &pool, chunk(1), &cancel);
        assert!(matches!(result, Err(PipelineError::Cancelled)));
    }

    #[test]
    fn test_chunk_size_does_not_change_counts() {
        let text = "one two two three three three ".repeat(40);
        let pool = WorkerPool::new(4).unwrap();
        let cancel = CancelToken::new();
        let expected =
            totals(count_words(&Tokenizer::new(), &text, &pool, chunk(1), &cancel).unwrap());
        for chunk_size in [2, 7, 64, 10_000] {
            let got =
                count_words(&Tokenizer::new(), &text, &pool, chunk(chunk_size), &cancel).unwrap();
            assert_eq!(totals(got), expected, "chunk size {chunk_size}");
        }
        assert_eq!(expected["three"], 120);
    }
}
