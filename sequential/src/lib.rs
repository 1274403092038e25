//! Single-threaded reference pipeline: map every token, sort the pairs, group
//! equal keys and reduce each group.

use common::{map, rank, reduce, Bucket, Count, Pair, RankedList, Tokenizer};
use itertools::Itertools;

/// Groups sorted pairs into buckets; buckets come out ordered by key.
pub fn shuffle(mut pairs: Vec<Pair>) -> Vec<Bucket> {
    pairs.sort();
    let groups = pairs.into_iter().group_by(|pair| pair.key.clone());
    let buckets = groups
        .into_iter()
        .map(|(key, group)| Bucket {
            key,
            values: group.map(|pair| pair.value).collect(),
        })
        .collect();
    buckets
}

pub fn map_all(tokenizer: &Tokenizer, contents: &str) -> Vec<Pair> {
    tokenizer.normalize(contents).tokens().map(map).collect()
}

/// Counts ordered by word.
pub fn word_counts(contents: &str) -> Vec<Count> {
    let pairs = map_all(&Tokenizer::new(), contents);
    shuffle(pairs).into_iter().map(reduce).collect()
}

pub fn top_words(contents: &str, n: usize) -> RankedList {
    rank(word_counts(contents), n)
}
