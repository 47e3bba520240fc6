//! Random walk over a precomputed transition table
//!
//! Used for per-user and per-channel snapshots. Every candidate sharing the
//! current context takes part in the weighted draw.
//!
//! - **Version**: 1.1.0
//! - **Since**: 2.0.0
//!
//! ## Changelog
//! - 1.1.0: Trigram support
//! - 1.0.0: Bigram walk over user snapshots

use log::debug;
use rand::Rng;

use super::table::{weighted_choice, TransitionTable};

/// Upper bound on extension steps per generation
pub const MAX_STEPS: usize = 50;

/// Default character budget
pub const DEFAULT_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Characters after which no further token is appended. The last token may overshoot.
    pub max_length: usize,
    pub start_word: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            start_word: None,
        }
    }
}

impl GenerationOptions {
    pub fn with_start_word(mut self, word: Option<String>) -> Self {
        self.start_word = word.filter(|w| !w.is_empty());
        self
    }

    pub(crate) fn start_word(&self) -> Option<&str> {
        self.start_word.as_deref().filter(|w| !w.is_empty())
    }
}

fn char_len(tokens: &[String]) -> usize {
    tokens.iter().map(|t| t.chars().count()).sum()
}

/// Choose the seed key: weighted among keys led by the start word, else uniform over the table
fn pick_start<'a, R: Rng>(
    table: &'a TransitionTable,
    start_word: Option<&str>,
    rng: &mut R,
) -> Option<&'a [String]> {
    if let Some(word) = start_word {
        let matching = table.keys_starting_with(word);
        if let Some(key) = weighted_choice(rng, &matching) {
            return Some(*key);
        }
        debug!("No transitions start with {word:?}, picking a random seed");
    }
    table.random_key(rng)
}

/// Generate text from `table`.
///
/// Returns `None` when the table is empty or the seed key has the wrong number of
/// tokens. Running out of candidates mid-walk is not a failure; whatever was built so
/// far is returned.
pub fn generate<R: Rng>(
    table: &TransitionTable,
    options: &GenerationOptions,
    rng: &mut R,
) -> Option<String> {
    let order = table.order();
    let seed = pick_start(table, options.start_word(), rng)?;

    if seed.len() != order.arity() {
        debug!(
            "Seed {:?} has {} tokens, expected {} for {}",
            seed,
            seed.len(),
            order.arity(),
            order.as_str()
        );
        return None;
    }

    let mut tokens = seed.to_vec();
    let mut length = char_len(&tokens);

    for step in 0..MAX_STEPS {
        if length >= options.max_length {
            break;
        }

        let context = &tokens[tokens.len() - order.context_len()..];
        let candidates = table.continuations(context);
        let Some(next) = weighted_choice(rng, &candidates).map(|next| next.to_string()) else {
            debug!("Walk ended after {step} steps: no continuation for {context:?}");
            break;
        };

        length += next.chars().count();
        tokens.push(next);
    }

    Some(tokens.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::markov::table::NgramOrder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bigram(entries: &[(&str, u64)]) -> TransitionTable {
        TransitionTable::from_joined(NgramOrder::Bigram, entries.iter().copied())
    }

    fn trigram(entries: &[(&str, u64)]) -> TransitionTable {
        TransitionTable::from_joined(NgramOrder::Trigram, entries.iter().copied())
    }

    #[test]
    fn test_empty_table_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = GenerationOptions::default();
        assert!(generate(&bigram(&[]), &options, &mut rng).is_none());
        assert!(generate(&trigram(&[]), &options, &mut rng).is_none());
    }

    #[test]
    fn test_start_word_scenario() {
        let table = bigram(&[("猫:が", 2), ("猫:は", 1)]);
        let options = GenerationOptions { max_length: 10, ..Default::default() }
            .with_start_word(Some("猫".to_string()));

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let text = generate(&table, &options, &mut rng).unwrap();
            assert!(text == "猫が" || text == "猫は", "unexpected {text}");
        }
    }

    #[test]
    fn test_start_word_is_weighted() {
        let table = bigram(&[("猫:が", 9), ("猫:は", 1)]);
        let options = GenerationOptions::default().with_start_word(Some("猫".to_string()));
        let mut rng = StdRng::seed_from_u64(3);

        let ga = (0..2_000)
            .filter(|_| generate(&table, &options, &mut rng).as_deref() == Some("猫が"))
            .count();
        assert!(ga > 1_600, "猫が picked {ga} times");
    }

    #[test]
    fn test_single_token_key_never_seeds_a_start_word() {
        let table = bigram(&[("猫", 9), ("猫:が", 1)]);
        let options = GenerationOptions::default().with_start_word(Some("猫".to_string()));

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(generate(&table, &options, &mut rng).as_deref(), Some("猫が"));
        }
    }

    #[test]
    fn test_unknown_start_word_falls_back_to_random_seed() {
        let table = bigram(&[("a:b", 1)]);
        let options = GenerationOptions::default().with_start_word(Some("zzz".to_string()));
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(generate(&table, &options, &mut rng).as_deref(), Some("ab"));
    }

    #[test]
    fn test_empty_start_word_is_ignored() {
        let options = GenerationOptions::default().with_start_word(Some(String::new()));
        assert!(options.start_word.is_none());
    }

    #[test]
    fn test_walk_follows_chain() {
        let table = bigram(&[("今日:は", 1), ("は:晴れ", 1), ("晴れ:です", 1)]);
        let options = GenerationOptions::default().with_start_word(Some("今日".to_string()));
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(
            generate(&table, &options, &mut rng).as_deref(),
            Some("今日は晴れです")
        );
    }

    #[test]
    fn test_trigram_walk_uses_two_token_context() {
        let table = trigram(&[("a:b:c", 1), ("b:c:d", 1), ("c:d:e", 1), ("x:c:z", 5)]);
        let options = GenerationOptions::default().with_start_word(Some("a".to_string()));
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(generate(&table, &options, &mut rng).as_deref(), Some("abcde"));
    }

    #[test]
    fn test_wrong_arity_seed_fails() {
        let table = bigram(&[("solo", 3)]);
        let mut rng = StdRng::seed_from_u64(4);
        assert!(generate(&table, &GenerationOptions::default(), &mut rng).is_none());

        // bigram-shaped data read as trigram
        let table = trigram(&[("a:b", 1)]);
        assert!(generate(&table, &GenerationOptions::default(), &mut rng).is_none());
    }

    #[test]
    fn test_length_budget_allows_single_token_overshoot() {
        let table = bigram(&[("ab:cd", 1), ("cd:efgh", 1), ("efgh:ij", 1)]);
        let options = GenerationOptions { max_length: 5, ..Default::default() }
            .with_start_word(Some("ab".to_string()));
        let mut rng = StdRng::seed_from_u64(6);

        // "abcd" is 4 chars (< 5), so "efgh" is appended; then 8 >= 5 stops the walk
        assert_eq!(generate(&table, &options, &mut rng).as_deref(), Some("abcdefgh"));
    }

    #[test]
    fn test_seed_longer_than_budget_is_still_returned() {
        let table = bigram(&[("長い単語:です", 1), ("です:ね", 1)]);
        let options = GenerationOptions { max_length: 2, ..Default::default() }
            .with_start_word(Some("長い単語".to_string()));
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(generate(&table, &options, &mut rng).as_deref(), Some("長い単語です"));
    }

    #[test]
    fn test_cycle_stops_after_max_steps() {
        let table = bigram(&[("a:a", 1)]);
        let options = GenerationOptions { max_length: usize::MAX, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(10);

        let text = generate(&table, &options, &mut rng).unwrap();
        assert_eq!(text.chars().count(), 2 + MAX_STEPS);
    }

    #[test]
    fn test_output_respects_budget_plus_one_token() {
        let table = bigram(&[("あ:い", 3), ("い:う", 2), ("う:あ", 1), ("い:あ", 1)]);
        for max_length in [1, 5, 17, 40] {
            let options = GenerationOptions { max_length, ..Default::default() };
            for seed in 0..20 {
                let mut rng = StdRng::seed_from_u64(seed);
                let text = generate(&table, &options, &mut rng).unwrap();
                // tokens are single characters here; seed itself is two
                assert!(text.chars().count() <= max_length.max(2) + 1);
            }
        }
    }
}
