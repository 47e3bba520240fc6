//! # Core Module
//!
//! Configuration, Discord text limits and shared embed builders.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.7.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Embed builders for markov, emoji and ranking replies
//! - 1.1.0: Add response module with Discord text limit utilities
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use response::{truncate_for_embed, truncate_for_field, truncate_for_message};
