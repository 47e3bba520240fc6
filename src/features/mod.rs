//! # Features
//!
//! Domain features of the bot. Each module documents its own version.

pub mod emoji;
pub mod markov;
pub mod ranking;
pub mod rate_limiting;

pub use emoji::{EmojiCatalog, EmojiResolution};
pub use markov::{MarkovOutcome, MarkovRequest, MarkovService, MarkovSource};
pub use ranking::{reaction_rank, ReactionRank};
pub use rate_limiting::RateLimiter;

/// Version metadata for one feature module
#[derive(Debug, Clone, Copy)]
pub struct FeatureInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub toggleable: bool,
}

pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn get_features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo {
            id: "emoji",
            name: "Emoji Aliases",
            version: "1.1.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "markov",
            name: "Markov Generation",
            version: "2.1.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "ranking",
            name: "Reaction Ranking",
            version: "1.0.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "rate_limiting",
            name: "Rate Limiting",
            version: "2.0.0",
            toggleable: false,
        },
    ]
}
