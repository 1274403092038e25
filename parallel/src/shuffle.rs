use common::{Bucket, Pair, Token};
use dashmap::DashMap;

/// Key-to-bucket map filled concurrently by map-stage workers.
///
/// Synchronization is per shard: `DashMap` guards each shard with its own
/// `RwLock`, so an `emit` only blocks writers whose key hashes to the same
/// shard, and only for the duration of one push.
#[derive(Debug, Default)]
pub struct Shuffle {
    buckets: DashMap<Token, Vec<u64>>,
}

impl Shuffle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, pair: Pair) {
        self.buckets.entry(pair.key).or_default().push(pair.value);
    }

    pub fn emit_all<I>(&self, pairs: I)
    where
        I: IntoIterator<Item = Pair>,
    {
        for pair in pairs {
            self.emit(pair);
        }
    }

    /// Number of distinct keys seen so far
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in unspecified order.
    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
            .into_iter()
            .map(|(key, values)| Bucket { key, values })
            .collect()
    }
}
