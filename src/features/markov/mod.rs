//! # Markov Text Generation Feature
//!
//! Generates text from observed word transitions. Per-user and per-channel
//! snapshots are walked with every candidate weighted; the global bigram
//! relation is walked over its strongest continuations.
//!
//! - **Version**: 2.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.1.0: Trigram snapshots with bigram fallback
//! - 2.0.0: Snapshot walk split from the global relational walk
//! - 1.0.0: Global bigram generation

pub mod generator;
pub mod relational;
pub mod service;
pub mod snapshot;
pub mod table;
pub mod text;

pub use generator::{generate, GenerationOptions, DEFAULT_MAX_LENGTH, MAX_STEPS};
pub use relational::{generate_from_edges, Edge, EdgeSource, WordId, TOP_CONTINUATIONS};
pub use service::{MarkovOutcome, MarkovRequest, MarkovService, MarkovSource};
pub use snapshot::{SnapshotScope, SnapshotStore};
pub use table::{weighted_choice, NgramOrder, TransitionTable, KEY_SEPARATOR};
pub use text::compact_newlines;
