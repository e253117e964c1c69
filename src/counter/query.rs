//! Query Engine
//!
//! Read-only operations over a borrowed [`FrequencyIndex`]. Nothing here
//! holds on to the index past the call.

use super::index::FrequencyIndex;
use super::types::WordCount;
use std::cmp::Ordering;

/// Looks up each word, in request order.
///
/// Matching is case-insensitive but each result keeps the caller's spelling
/// as its label. Duplicates produce one entry each; unknown words count `0`.
pub fn lookup<S: AsRef<str>>(index: &FrequencyIndex, words: &[S]) -> Vec<WordCount> {
    words
        .iter()
        .map(|word| {
            let word = word.as_ref();
            WordCount::new(word, index.get(&word.to_lowercase()))
        })
        .collect()
}

/// The `n` most frequent words, highest count first.
///
/// Equal counts are ordered by word ascending. `n <= 0` yields nothing and
/// an `n` past the index size yields every entry.
pub fn top_n(index: &FrequencyIndex, n: i64) -> Vec<WordCount> {
    if n <= 0 || index.is_empty() {
        return Vec::new();
    }
    let n = usize::try_from(n).unwrap_or(usize::MAX);

    let mut entries: Vec<(&str, u64)> = index.iter().collect();
    if n < entries.len() {
        // Partition the top n to the front before sorting only those.
        entries.select_nth_unstable_by(n - 1, rank);
        entries.truncate(n);
    }
    entries.sort_unstable_by(rank);

    entries
        .into_iter()
        .map(|(word, count)| WordCount::new(word, count))
        .collect()
}

/// Count descending, then word ascending.
fn rank(a: &(&str, u64), b: &(&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}
