// Core layer - shared types and configuration
pub mod core;

// Features layer - emoji resolution, markov generation, ranking, rate limiting
pub mod features;

// Infrastructure
pub mod database;

// Application layer
pub mod command_handler;
pub mod commands;

// Re-export core config for backwards compatibility
pub use core::Config;

// Re-export feature items
pub use features::{
    reaction_rank, EmojiCatalog, EmojiResolution, MarkovOutcome, MarkovRequest, MarkovService,
    MarkovSource, RateLimiter, ReactionRank,
};
