//! Emoji input normalization
//!
//! Turns free-form user input (`:name:`, `<:name:id>`, or a raw Unicode emoji)
//! into a base name plus every alias that should be counted as the same emoji.
//!
//! - **Version**: 1.1.0
//! - **Since**: 2.0.0
//!
//! ## Changelog
//! - 1.1.0: Canonical base names resolve to themselves even when not listed as an alias
//! - 1.0.0: Initial implementation

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::catalog::{is_special, EmojiCatalog};

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

static TONE_SUFFIX_RE: OnceLock<Regex> = OnceLock::new();
static CUSTOM_EMOJI_RE: OnceLock<Regex> = OnceLock::new();

fn tone_suffix_re() -> &'static Regex {
    TONE_SUFFIX_RE.get_or_init(|| {
        Regex::new(
            r"_(?:tone[1-5]|light_skin_tone|medium_light_skin_tone|medium_skin_tone|medium_dark_skin_tone|dark_skin_tone)$",
        )
        .expect("tone suffix pattern is valid")
    })
}

fn custom_emoji_re() -> &'static Regex {
    CUSTOM_EMOJI_RE
        .get_or_init(|| Regex::new(r"^<:([A-Za-z0-9_]+):\d+>$").expect("custom emoji pattern is valid"))
}

/// Skin tone modifiers U+1F3FB..=U+1F3FF
fn is_skin_tone_modifier(ch: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&ch)
}

/// Remove skin tone modifier codepoints and VS16 from a grapheme sequence
pub fn strip_tone_modifiers(s: &str) -> String {
    s.chars()
        .filter(|&ch| !is_skin_tone_modifier(ch) && ch != VARIATION_SELECTOR_16)
        .collect()
}

/// Lower-case a name and drop a trailing skin tone suffix (`_tone3`, `_dark_skin_tone`, ...)
pub fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    tone_suffix_re().replace(&lower, "").into_owned()
}

/// Outcome of resolving a user-supplied emoji reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiResolution {
    pub base_name: Option<String>,
    /// Every alias counted as the same emoji, base name included. Empty when unresolved.
    pub variants: BTreeSet<String>,
}

impl EmojiResolution {
    fn unresolved() -> Self {
        Self::default()
    }

    fn single(name: String) -> Self {
        let variants = BTreeSet::from([name.clone()]);
        Self {
            base_name: Some(name),
            variants,
        }
    }
}

/// Resolve free-form input against the catalog. Never fails; unknown input yields an empty resolution.
pub fn resolve(catalog: &EmojiCatalog, input: &str) -> EmojiResolution {
    let mut raw = input.trim();

    if raw.chars().count() >= 3 && raw.starts_with(':') && raw.ends_with(':') {
        raw = &raw[1..raw.len() - 1];
    }

    if let Some(caps) = custom_emoji_re().captures(raw) {
        let name = caps[1].to_lowercase();
        return if is_special(&name) {
            EmojiResolution::single(name)
        } else {
            EmojiResolution::unresolved()
        };
    }

    let base = if let Some(base) = catalog.base_of(raw) {
        base.to_string()
    } else if is_special(raw) || catalog.is_base_name(raw) {
        raw.to_string()
    } else if let Some(base) = catalog.base_of_surrogate(&strip_tone_modifiers(raw)) {
        base.to_string()
    } else {
        return EmojiResolution::unresolved();
    };

    if base.is_empty() || !(catalog.is_base_name(&base) || is_special(&base)) {
        return EmojiResolution::unresolved();
    }

    let mut variants: BTreeSet<String> = catalog.aliases_of(&base).map(String::from).collect();
    variants.insert(base.clone());

    EmojiResolution {
        base_name: Some(base),
        variants,
    }
}

impl EmojiCatalog {
    /// Shorthand for [`resolve`] against this catalog
    pub fn resolve(&self, input: &str) -> EmojiResolution {
        resolve(self, input)
    }
}
