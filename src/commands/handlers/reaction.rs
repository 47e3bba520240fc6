//! Reaction command handlers
//!
//! Handles: reactionrank, emoji
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::core::embeds::{emoji_embed, error_embed, reaction_rank_embed};
use crate::features::emoji::{EmojiCatalog, EmojiResolution};
use crate::features::ranking::reaction_rank;

pub const UNKNOWN_EMOJI_MESSAGE: &str = "Could not identify that emoji.";

/// Unicode rendering of a base name, or `:name:` for custom emoji
pub fn render(catalog: &EmojiCatalog, base_name: &str) -> String {
    catalog
        .surrogate_for(base_name)
        .map(str::to_string)
        .unwrap_or_else(|| format!(":{base_name}:"))
}

/// Handler for reaction commands: reactionrank, emoji
pub struct ReactionHandler;

#[async_trait]
impl SlashCommandHandler for ReactionHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["reactionrank", "emoji"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        let command_name = command.data.name.as_str();
        let user_id = command.user.id.0;
        let input = get_string_option(&command.data.options, "reaction").unwrap_or_default();

        let resolution = ctx.emoji_catalog.resolve(&input);
        let Some(base_name) = resolution.base_name.as_deref() else {
            info!("[{request_id}] Could not resolve {input:?}");
            self.reply(serenity_ctx, command, error_embed(UNKNOWN_EMOJI_MESSAGE), true)
                .await?;
            ctx.log_result(request_id, user_id, command_name, "INVALID_EMOJI")
                .await;
            return Ok(());
        };

        match command_name {
            "reactionrank" => {
                self.handle_reactionrank(&ctx, serenity_ctx, command, &resolution, base_name, request_id)
                    .await?
            }
            "emoji" => {
                self.handle_emoji(&ctx, serenity_ctx, command, &resolution, base_name, request_id)
                    .await?
            }
            _ => return Ok(()),
        }

        ctx.log_result(request_id, user_id, command_name, "OK").await;
        Ok(())
    }
}

impl ReactionHandler {
    /// Handle /reactionrank - caller's rank across every variant of the emoji
    async fn handle_reactionrank(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        resolution: &EmojiResolution,
        base_name: &str,
        request_id: Uuid,
    ) -> Result<()> {
        // the aggregate query can outlast the initial response window
        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await
            .map_err(|e| {
                error!("[{request_id}] Failed to defer interaction: {e}");
                anyhow::anyhow!("Failed to defer interaction: {e}")
            })?;

        let totals = ctx.database.reaction_totals(&resolution.variants).await?;
        let rank = reaction_rank(&totals, command.user.id.0);
        info!(
            "[{request_id}] {} variants of :{base_name}: across {} authors, caller rank {:?}",
            resolution.variants.len(),
            totals.len(),
            rank
        );

        let embed = reaction_rank_embed(
            &command.user.name,
            base_name,
            &render(&ctx.emoji_catalog, base_name),
            rank,
        );
        command
            .edit_original_interaction_response(&serenity_ctx.http, |r| r.set_embed(embed))
            .await?;
        Ok(())
    }

    /// Handle /emoji - base name and variant list
    async fn handle_emoji(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        resolution: &EmojiResolution,
        base_name: &str,
        request_id: Uuid,
    ) -> Result<()> {
        let variants: Vec<&str> = resolution.variants.iter().map(String::as_str).collect();
        info!("[{request_id}] :{base_name}: has {} variants", variants.len());

        let embed = emoji_embed(base_name, &render(&ctx.emoji_catalog, base_name), &variants);
        self.reply(serenity_ctx, command, embed, false).await
    }

    async fn reply(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        embed: CreateEmbed,
        ephemeral: bool,
    ) -> Result<()> {
        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.set_embed(embed).ephemeral(ephemeral))
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::emoji::catalog::tests::sample_catalog;

    #[test]
    fn test_reaction_handler_commands() {
        let names = ReactionHandler.command_names();
        assert!(names.contains(&"reactionrank"));
        assert!(names.contains(&"emoji"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_render_uses_surrogate() {
        let catalog = sample_catalog();
        assert_eq!(render(&catalog, "grin"), "😁");
        assert_eq!(render(&catalog, "thumbsup"), "👍");
    }

    #[test]
    fn test_render_falls_back_to_name() {
        let catalog = sample_catalog();
        assert_eq!(render(&catalog, "ebi"), ":ebi:");
        assert_eq!(render(&EmojiCatalog::empty(), "grin"), ":grin:");
    }
}
