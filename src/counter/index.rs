//! Word Frequency Index
//!
//! Counts token occurrences for a single resource. Counting is split across
//! rayon workers: the token slice is cut into chunks, each chunk is counted
//! into its own map, and the partial maps are merged by per-word summation.
//! Summation is associative and commutative, so the chunking never changes
//! the final counts.

use rayon::prelude::*;
use std::collections::HashMap;

/// Tokens counted by a single rayon job.
const CHUNK_SIZE: usize = 16 * 1024;

/// Immutable word -> occurrence count table for one resource.
///
/// Built once, then shared read-only behind an `Arc` by the resource cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyIndex {
    counts: HashMap<String, u64>,
    total_tokens: u64,
}

impl FrequencyIndex {
    /// An index with no words, used for empty or unavailable resources.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Counts `tokens` using the default chunk size.
    pub fn from_tokens<T>(tokens: &[T]) -> Self
    where
        T: AsRef<str> + Sync,
    {
        Self::count_chunked(tokens, CHUNK_SIZE)
    }

    /// Counts `tokens` split into (at most) `partitions` roughly equal chunks.
    ///
    /// Gives the same result as [`FrequencyIndex::from_tokens`] for any
    /// partition count; a count of zero is treated as one.
    pub fn with_partitions<T>(tokens: &[T], partitions: usize) -> Self
    where
        T: AsRef<str> + Sync,
    {
        let chunk_size = tokens.len().div_ceil(partitions.max(1)).max(1);
        Self::count_chunked(tokens, chunk_size)
    }

    /// Wraps an already computed count table.
    pub fn from_counts(counts: HashMap<String, u64>) -> Self {
        let total_tokens = counts.values().sum();
        Self {
            counts,
            total_tokens,
        }
    }

    fn count_chunked<T>(tokens: &[T], chunk_size: usize) -> Self
    where
        T: AsRef<str> + Sync,
    {
        let counts = tokens
            .par_chunks(chunk_size)
            .map(count_chunk)
            .reduce(HashMap::new, merge_counts);

        Self {
            counts,
            total_tokens: tokens.len() as u64,
        }
    }

    /// Occurrences of an already lowercased word, `0` when absent.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of tokens the index was built from.
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Iterates over `(word, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

fn count_chunk<T: AsRef<str>>(chunk: &[T]) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for token in chunk {
        let token = token.as_ref();
        match counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                counts.insert(token.to_string(), 1);
            }
        }
    }
    counts
}

/// Merges two partial count tables by summing per word.
pub fn merge_counts(
    mut left: HashMap<String, u64>,
    mut right: HashMap<String, u64>,
) -> HashMap<String, u64> {
    // Fold the smaller table into the larger one.
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (word, count) in right {
        *left.entry(word).or_insert(0) += count;
    }
    left
}
