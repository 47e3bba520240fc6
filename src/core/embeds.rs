//! Embed builders for command replies
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Markov, emoji and reaction rank embeds
//! - 1.0.0: Initial creation

use crate::core::{truncate_for_embed, truncate_for_field};
use crate::features::markov::NgramOrder;
use crate::features::ranking::ReactionRank;
use serenity::builder::CreateEmbed;

pub const MARKOV_COLOR: u32 = 0x5865F2;
pub const EMOJI_COLOR: u32 = 0xFEE75C;
pub const RANK_COLOR: u32 = 0x57F287;
pub const ERROR_COLOR: u32 = 0xED4245;

/// User-facing label for a generation mode
pub fn mode_label(order: NgramOrder) -> &'static str {
    match order {
        NgramOrder::Bigram => "normal",
        NgramOrder::Trigram => "precise",
    }
}

/// Generated text with the scope it came from and the mode actually used
pub fn markov_embed(text: &str, scope: &str, order: NgramOrder) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.color(MARKOV_COLOR);
    embed.description(truncate_for_embed(text));
    embed.field("Scope", scope, true);
    embed.field("Mode", mode_label(order), true);
    embed
}

/// Base name, its rendering and every variant counted with it
pub fn emoji_embed(base_name: &str, rendering: &str, variants: &[&str]) -> CreateEmbed {
    let listed = variants
        .iter()
        .map(|v| format!("`{v}`"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut embed = CreateEmbed::default();
    embed.title(format!("{rendering} :{base_name}:"));
    embed.color(EMOJI_COLOR);
    embed.field(
        format!("Variants ({})", variants.len()),
        truncate_for_field(&listed),
        false,
    );
    embed
}

/// Caller's standing for one emoji, or unranked when `rank` is `None`
pub fn reaction_rank_embed(
    user_name: &str,
    base_name: &str,
    rendering: &str,
    rank: Option<ReactionRank>,
) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.title(format!("{rendering} Reaction rank for {user_name}"));
    embed.color(RANK_COLOR);
    embed.field("Emoji", format!(":{base_name}:"), true);
    match rank {
        Some(ReactionRank { rank, total }) => {
            embed.field("Rank", format!("#{rank}"), true);
            embed.field("Received", total.to_string(), true);
        }
        None => {
            embed.field("Rank", "Unranked", true);
            embed.field("Received", "0", true);
        }
    }
    embed
}

/// Short error reply
pub fn error_embed(message: &str) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.color(ERROR_COLOR);
    embed.description(message);
    embed
}
