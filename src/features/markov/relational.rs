//! Bigram walk over the global word-edge relation
//!
//! Unlike the snapshot walk, each step only weighs the strongest
//! [`TOP_CONTINUATIONS`] outgoing edges of the current word.
//!
//! Seeding only uses edges with a positive count. A start word that has no such
//! edge does not end generation: the walk seeds from a random edge of the whole
//! relation instead.
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0

use anyhow::Result;
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::generator::{GenerationOptions, MAX_STEPS};
use super::table::weighted_choice;

pub type WordId = i64;

/// Number of strongest continuations considered per step
pub const TOP_CONTINUATIONS: usize = 10;

/// One `(word1_id, word2_id, count)` row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: WordId,
    pub to: WordId,
    pub count: u64,
}

/// Read access to a word dictionary plus a weighted bigram edge relation
pub trait EdgeSource {
    fn word_id(&self, word: &str) -> Result<Option<WordId>>;

    fn word(&self, id: WordId) -> Result<Option<String>>;

    /// Number of edges with a positive count
    fn edge_count(&self) -> Result<u64>;

    /// Positive-count edge at `index` in a stable enumeration of the relation
    fn nth_edge(&self, index: u64) -> Result<Option<Edge>>;

    /// Outgoing edges of `from`, highest count first, at most `limit` if given
    fn edges_from(&self, from: WordId, limit: Option<usize>) -> Result<Vec<Edge>>;
}

fn random_edge<S: EdgeSource + ?Sized, R: Rng>(source: &S, rng: &mut R) -> Result<Option<Edge>> {
    let total = source.edge_count()?;
    if total == 0 {
        return Ok(None);
    }
    source.nth_edge(rng.random_range(0..total))
}

/// Seed edge: the start word's strongest positive edge if it has one, otherwise any positive edge
fn pick_start<S: EdgeSource + ?Sized, R: Rng>(
    source: &S,
    start_word: Option<&str>,
    rng: &mut R,
) -> Result<Option<Edge>> {
    if let Some(word) = start_word {
        if let Some(id) = source.word_id(word)? {
            let strongest = source.edges_from(id, Some(1))?.into_iter().next();
            if let Some(edge) = strongest.filter(|edge| edge.count > 0) {
                return Ok(Some(edge));
            }
        }
        debug!("No edges leave {word:?}, picking a random seed");
    }
    random_edge(source, rng)
}

fn word_text<S: EdgeSource + ?Sized>(source: &S, id: WordId) -> Result<String> {
    Ok(source.word(id)?.unwrap_or_else(|| {
        debug!("Word id {id} missing from dictionary");
        String::new()
    }))
}

/// Generate text by walking the edge relation.
///
/// `Ok(None)` means the relation holds no positive-count edge. If the strongest continuations carry no weight,
/// one outgoing edge is taken uniformly regardless of count; the walk ends when the
/// current word has no outgoing edge at all.
pub fn generate_from_edges<S: EdgeSource + ?Sized, R: Rng>(
    source: &S,
    options: &GenerationOptions,
    rng: &mut R,
) -> Result<Option<String>> {
    let Some(seed) = pick_start(source, options.start_word(), rng)? else {
        return Ok(None);
    };

    let mut tokens = vec![word_text(source, seed.from)?, word_text(source, seed.to)?];
    let mut length: usize = tokens.iter().map(|t| t.chars().count()).sum();
    let mut current = seed.to;

    for step in 0..MAX_STEPS {
        if length >= options.max_length {
            break;
        }

        let strongest: Vec<(WordId, u64)> = source
            .edges_from(current, Some(TOP_CONTINUATIONS))?
            .into_iter()
            .map(|edge| (edge.to, edge.count))
            .collect();

        let next = match weighted_choice(rng, &strongest) {
            Some(&to) => to,
            None => match source.edges_from(current, None)?.choose(rng) {
                Some(edge) => edge.to,
                None => {
                    debug!("Walk ended after {step} steps: word {current} has no edges");
                    break;
                }
            },
        };

        let text = word_text(source, next)?;
        length += text.chars().count();
        tokens.push(text);
        current = next;
    }

    Ok(Some(tokens.concat()))
}
