//! Emoji master table and the name/surrogate mappings derived from it
//!
//! - **Version**: 1.1.0
//! - **Since**: 2.0.0
//!
//! ## Changelog
//! - 1.1.0: Add surrogate_for() for rendering resolved names
//! - 1.0.0: Initial load of discord-emojis.pretty.json

use anyhow::Result;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::resolver::{normalize_name, strip_tone_modifiers};

/// Server-specific custom emoji that are valid base names without a master record
pub const SPECIAL_OK: &[&str] = &[
    "__",
    "bi",
    "e_",
    "ebi",
    "ebisushi",
    "kanji",
    "mo",
    "pineappleman",
    "ebing",
];

/// Returns true if `name` is on the custom emoji allow-list
pub fn is_special(name: &str) -> bool {
    SPECIAL_OK.contains(&name)
}

/// A single record of the master file
#[derive(Debug, Clone, Deserialize)]
pub struct EmojiRecord {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub surrogates: Option<String>,
}

/// Immutable view over the emoji master table.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct EmojiCatalog {
    /// alias -> tone-stripped primary name
    name_to_base: HashMap<String, String>,
    /// every alias across all records
    valid_names: HashSet<String>,
    /// tone-stripped surrogate -> primary name
    surrogate_to_base: HashMap<String, String>,
    /// lower-cased alias -> raw surrogate, for rendering
    surrogates_by_name: HashMap<String, String>,
    base_names: HashSet<String>,
}

impl EmojiCatalog {
    /// An empty catalog. Only allow-listed names resolve against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the master file, degrading to an empty catalog if it is missing or corrupt
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Failed to load emoji master {}: {e}", path.display());
                Self::empty()
            }
        }
    }

    /// Load the master file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse the master JSON: an object of category -> list of records.
    ///
    /// Records that do not deserialize are skipped rather than failing the whole load.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: HashMap<String, Value> = serde_json::from_str(json)?;

        let records = root
            .into_values()
            .filter_map(|category| match category {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .flatten()
            .filter_map(|item| serde_json::from_value::<EmojiRecord>(item).ok());

        let catalog = Self::from_records(records);
        debug!(
            "Emoji catalog built: {} names, {} surrogates",
            catalog.valid_names.len(),
            catalog.surrogate_to_base.len()
        );
        Ok(catalog)
    }

    /// Build the derived mappings from records
    pub fn from_records(records: impl IntoIterator<Item = EmojiRecord>) -> Self {
        let mut catalog = Self::default();

        for record in records {
            let Some(primary) = record.names.first() else {
                continue;
            };
            // every alias of a record groups under its first-listed name, tone suffix removed
            let base = normalize_name(primary);

            for name in &record.names {
                catalog.valid_names.insert(name.clone());
                catalog.name_to_base.insert(name.clone(), base.clone());
            }

            let Some(surrogate) = &record.surrogates else {
                continue;
            };

            for name in &record.names {
                catalog
                    .surrogates_by_name
                    .entry(name.to_lowercase())
                    .or_insert_with(|| surrogate.clone());
            }

            let stripped = strip_tone_modifiers(surrogate);
            if !stripped.is_empty() && !base.is_empty() {
                catalog.surrogate_to_base.insert(stripped, base);
            }
        }

        catalog.base_names = catalog.name_to_base.values().cloned().collect();
        catalog
    }

    /// Base name for a known alias (exact, case-sensitive)
    pub fn base_of(&self, name: &str) -> Option<&str> {
        self.name_to_base.get(name).map(String::as_str)
    }

    /// Base name for a tone-stripped Unicode grapheme
    pub fn base_of_surrogate(&self, stripped: &str) -> Option<&str> {
        self.surrogate_to_base.get(stripped).map(String::as_str)
    }

    /// Whether `name` is the base of at least one alias in the table
    pub fn is_base_name(&self, name: &str) -> bool {
        self.base_names.contains(name)
    }

    /// All aliases that normalize to `base`
    pub fn aliases_of<'a>(&'a self, base: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.valid_names
            .iter()
            .filter(move |name| self.name_to_base.get(*name).map(String::as_str) == Some(base))
            .map(String::as_str)
    }

    /// Unicode rendering of an alias, matched case-insensitively
    pub fn surrogate_for(&self, name: &str) -> Option<&str> {
        self.surrogates_by_name
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.valid_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_names.is_empty()
    }
}
