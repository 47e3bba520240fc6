//! Typed n-gram transition table
//!
//! Keys are token sequences rather than colon-joined strings, so a context
//! lookup is a direct map access instead of a string prefix scan.
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0

use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Separator used by the precomputed snapshot files
pub const KEY_SEPARATOR: char = ':';

/// N-gram size of a transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NgramOrder {
    Bigram,
    Trigram,
}

impl NgramOrder {
    /// Tokens per transition key
    pub fn arity(self) -> usize {
        match self {
            NgramOrder::Bigram => 2,
            NgramOrder::Trigram => 3,
        }
    }

    /// Tokens of context used to pick the next token
    pub fn context_len(self) -> usize {
        self.arity() - 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NgramOrder::Bigram => "bigram",
            NgramOrder::Trigram => "trigram",
        }
    }
}

/// Weighted transitions keyed by token sequences.
///
/// Zero-count transitions are discarded on insert, so every stored key has positive weight.
/// Iteration order is the lexicographic order of the keys, which keeps weighted draws
/// reproducible under a seeded RNG.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    order: NgramOrder,
    keys: BTreeMap<Vec<String>, u64>,
    continuations: HashMap<Vec<String>, BTreeMap<String, u64>>,
}

impl TransitionTable {
    pub fn new(order: NgramOrder) -> Self {
        Self {
            order,
            keys: BTreeMap::new(),
            continuations: HashMap::new(),
        }
    }

    /// Build from snapshot data keyed by `"w1:w2"` / `"w1:w2:w3"`.
    ///
    /// Keys that split into the wrong number of tokens are kept as start candidates
    /// (picking one makes generation fail) but never serve as continuations.
    pub fn from_joined<I, K>(order: NgramOrder, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut table = Self::new(order);
        for (key, count) in entries {
            let tokens = key
                .as_ref()
                .split(KEY_SEPARATOR)
                .map(String::from)
                .collect();
            table.insert(tokens, count);
        }
        table
    }

    /// Add `count` occurrences of a transition, merging with any existing count
    pub fn insert(&mut self, tokens: Vec<String>, count: u64) {
        if count == 0 || tokens.is_empty() {
            return;
        }

        if tokens.len() == self.order.arity() {
            let (context, next) = tokens.split_at(self.order.context_len());
            let slot = self
                .continuations
                .entry(context.to_vec())
                .or_default()
                .entry(next[0].clone())
                .or_insert(0);
            *slot = slot.saturating_add(count);
        }

        let total = self.keys.entry(tokens).or_insert(0);
        *total = total.saturating_add(count);
    }

    pub fn order(&self) -> NgramOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Any key, uniformly at random
    pub fn random_key<R: Rng>(&self, rng: &mut R) -> Option<&[String]> {
        if self.keys.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.keys.len());
        self.keys.keys().nth(index).map(Vec::as_slice)
    }

    /// Keys led by `word` and followed by at least one more token, with their counts
    pub fn keys_starting_with(&self, word: &str) -> Vec<(&[String], u64)> {
        let lower = vec![word.to_string()];
        self.keys
            .range(lower..)
            .take_while(|(key, _)| key.first().map(String::as_str) == Some(word))
            .filter(|(key, _)| key.len() >= 2)
            .map(|(key, count)| (key.as_slice(), *count))
            .collect()
    }

    /// Possible next tokens after `context`, with their counts
    pub fn continuations<S: AsRef<str>>(&self, context: &[S]) -> Vec<(&str, u64)> {
        let context: Vec<String> = context.iter().map(|s| s.as_ref().to_string()).collect();
        self.continuations
            .get(&context)
            .map(|next| next.iter().map(|(token, count)| (token.as_str(), *count)).collect())
            .unwrap_or_default()
    }
}

/// Pick one candidate with probability `count / total`.
///
/// Draws an integer in `1..=total` and walks the candidates accumulating counts until the
/// running sum reaches the draw. Returns `None` if the total weight is zero.
pub fn weighted_choice<'a, T, R: Rng>(rng: &mut R, candidates: &'a [(T, u64)]) -> Option<&'a T> {
    let total = candidates
        .iter()
        .fold(0u64, |sum, (_, count)| sum.saturating_add(*count));
    if total == 0 {
        return None;
    }

    let draw = rng.random_range(1..=total);
    let mut cumulative = 0u64;
    for (candidate, count) in candidates {
        cumulative = cumulative.saturating_add(*count);
        if cumulative >= draw {
            return Some(candidate);
        }
    }
    None
}
