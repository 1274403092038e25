use std::{cmp::Ordering, slice};

use itertools::Itertools;
use serde::Serialize;

use crate::Count;

/// Counts ordered by total descending, ties broken by word ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedList(Vec<Count>);

impl RankedList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Count> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Count] {
        &self.0
    }

    /// The first `n` entries, or all of them if there are fewer.
    pub fn top(&self, n: usize) -> &[Count] {
        &self.0[..n.min(self.0.len())]
    }

    pub fn into_vec(self) -> Vec<Count> {
        self.0
    }
}

impl IntoIterator for RankedList {
    type Item = Count;
    type IntoIter = std::vec::IntoIter<Count>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a Count;
    type IntoIter = slice::Iter<'a, Count>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub fn by_frequency(a: &Count, b: &Count) -> Ordering {
    b.total.cmp(&a.total).then_with(|| a.word.cmp(&b.word))
}

/// Keeps the `n` most frequent words.
pub fn rank<I>(counts: I, n: usize) -> RankedList
where
    I: IntoIterator<Item = Count>,
{
    if n == 0 {
        return RankedList::default();
    }
    let mut counts = counts.into_iter().collect_vec();
    if n < counts.len() {
        counts.select_nth_unstable_by(n - 1, by_frequency);
        counts.truncate(n);
    }
    counts.sort_unstable_by(by_frequency);
    RankedList(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    fn counts(entries: &[(&str, u64)]) -> Vec<Count> {
        entries
            .iter()
            .map(|&(w, n)| Count::new(Token::new(w).unwrap(), n))
            .collect()
    }

    fn words(list: &RankedList) -> Vec<(&str, u64)> {
        list.iter().map(|c| (c.word.as_str(), c.total)).collect()
    }

    #[test]
    fn test_rank_orders_by_total() {
        let list = rank(counts(&[("a", 1), ("b", 5), ("c", 3)]), 10);
        assert_eq!(words(&list), [("b", 5), ("c", 3), ("a", 1)]);
    }

    #[test]
    fn test_rank_ties_break_lexicographically() {
        let list = rank(counts(&[("the", 2), ("sat", 2), ("cat", 2)]), 2);
        assert_eq!(words(&list), [("cat", 2), ("sat", 2)]);
    }

    #[test]
    fn test_rank_truncates_after_tie_break() {
        let list = rank(
            counts(&[("zeta", 9), ("beta", 4), ("alpha", 4), ("gamma", 4), ("omega", 1)]),
            3,
        );
        assert_eq!(words(&list), [("zeta", 9), ("alpha", 4), ("beta", 4)]);
    }

    #[test]
    fn test_rank_zero_and_empty() {
        assert!(rank(counts(&[("a", 1)]), 0).is_empty());
        assert!(rank(Vec::new(), 5).is_empty());
    }

    #[test]
    fn test_rank_n_exceeds_distinct_words() {
        let list = rank(counts(&[("a", 1), ("b", 2)]), 100);
        assert_eq!(list.len(), 2);
        assert_eq!(list.top(1)[0].word.as_str(), "b");
        assert_eq!(list.top(10).len(), 2);
    }

    #[test]
    fn test_rank_is_deterministic_across_input_orders() {
        let input = counts(&[("d", 3), ("c", 3), ("b", 3), ("a", 3), ("e", 7)]);
        let mut reversed = input.clone();
        reversed.reverse();
        assert_eq!(rank(input, 4), rank(reversed, 4));
    }
}
