//! # Reaction Ranking Feature
//!
//! Ranks message authors by how many reactions of one emoji (and all of its
//! aliases and skin-tone variants) they have received.
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0
//! - **Toggleable**: false

pub mod reactions;

pub use reactions::{reaction_rank, ReactionRank};
