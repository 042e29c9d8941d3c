//! Vocabulary builders over rows of tokens

use std::collections::{BTreeMap, HashSet};

/// Occurrence counts keyed by token
pub type Counter = BTreeMap<String, usize>;

/// Count tokens over all rows, keeping those seen at least `cutoff` times
pub fn counter_vocab<R, S>(rows: &[R], cutoff: usize) -> Counter
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut vocab = Counter::new();
    for token in rows.iter().flat_map(AsRef::<[S]>::as_ref) {
        *vocab.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    vocab.retain(|_, count| *count >= cutoff);
    vocab
}

/// Count characters over all tokens, keeping those seen at least `cutoff` times
pub fn counter_character_vocab<R, S>(rows: &[R], cutoff: usize) -> BTreeMap<char, usize>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut vocab = BTreeMap::new();
    for token in rows.iter().flat_map(AsRef::<[S]>::as_ref) {
        for c in token.as_ref().chars() {
            *vocab.entry(c).or_insert(0) += 1;
        }
    }
    vocab.retain(|_, count| *count >= cutoff);
    vocab
}

/// Distinct characters over all tokens, in first-seen order unless `sort` is set
pub fn set_character_vocab<R, S>(rows: &[R], sort: bool) -> Vec<char>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut vocab: Vec<char> = rows
        .iter()
        .flat_map(AsRef::<[S]>::as_ref)
        .flat_map(|token| token.as_ref().chars())
        .filter(|c| seen.insert(*c))
        .collect();
    if sort {
        vocab.sort_unstable();
    }
    vocab
}
