//! # Emoji Feature
//!
//! Emoji alias resolution backed by the Discord emoji master table.
//!
//! - **Version**: 1.1.0
//! - **Since**: 2.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add surrogate rendering for resolved names
//! - 1.0.0: Initial release

pub mod catalog;
pub mod resolver;

pub use catalog::{is_special, EmojiCatalog, EmojiRecord, SPECIAL_OK};
pub use resolver::{normalize_name, resolve, strip_tone_modifiers, EmojiResolution};
