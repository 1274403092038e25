//! Data model and per-unit transforms shared by the parallel and sequential
//! word-frequency pipelines.

use serde::Serialize;

pub mod rank;
pub mod token;

pub use rank::{by_frequency, rank, RankedList};
pub use token::{Normalized, Token, Tokenizer, Tokens};

/// One occurrence of a word, as emitted by the map stage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair {
    pub key: Token,
    pub value: u64,
}

/// Every value mapped to a single key, prior to summation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: Token,
    pub values: Vec<u64>,
}

/// A word and its total number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Count {
    pub word: Token,
    pub total: u64,
}

impl Count {
    pub fn new(word: Token, total: u64) -> Self {
        Self { word, total }
    }
}

pub fn map(token: Token) -> Pair {
    Pair {
        key: token,
        value: 1,
    }
}

pub fn reduce(bucket: Bucket) -> Count {
    let total = bucket.values.iter().sum();
    Count {
        word: bucket.key,
        total,
    }
}
