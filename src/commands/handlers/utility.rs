//! Utility command handlers
//!
//! Handles: ping, help
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Help lists feature versions
//! - 1.0.0: Extracted from command_handler.rs

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::core::truncate_for_message;
use crate::features::{get_bot_version, get_features};

const HELP_COMMANDS: &str = r#"**Available Slash Commands:**
`/ping` - Test bot responsiveness
`/help` - Show this help message
`/markov [scope] [mode] [start] [channel_id]` - Generate a sentence from past messages
`/reactionrank <reaction>` - Your rank for reactions received with an emoji
`/emoji <reaction>` - Show an emoji's base name and variants

**Markov scopes:** `self` (default), `channel`, `global`
**Markov modes:** `normal` (default), `precise`"#;

/// Full help text with the running version and feature list
pub fn help_text() -> String {
    let mut text = format!("{HELP_COMMANDS}\n\n**SEKAM v{}**\n", get_bot_version());
    for feature in get_features() {
        text.push_str(&format!("• {} v{}\n", feature.name, feature.version));
    }
    truncate_for_message(text.trim_end())
}

/// Handler for utility commands: ping, help
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "help"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "ping" => self.handle_ping(&ctx, serenity_ctx, command, request_id).await,
            "help" => self.handle_help(&ctx, serenity_ctx, command, request_id).await,
            _ => Ok(()),
        }
    }
}

impl UtilityHandler {
    /// Handle /ping command
    async fn handle_ping(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        let user_id = command.user.id.0;

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content("Pong!"))
            })
            .await?;

        ctx.log_result(request_id, user_id, "ping", "OK").await;
        info!("[{request_id}] Ping command completed for user {user_id}");
        Ok(())
    }

    /// Handle /help command
    async fn handle_help(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        let text = help_text();

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(text).ephemeral(true))
            })
            .await?;

        ctx.log_result(request_id, command.user.id.0, "help", "OK").await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_handler_commands() {
        let handler = UtilityHandler;
        let names = handler.command_names();

        assert!(names.contains(&"ping"));
        assert!(names.contains(&"help"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_help_mentions_every_command() {
        let text = help_text();
        for command in ["/ping", "/help", "/markov", "/reactionrank", "/emoji"] {
            assert!(text.contains(command), "help is missing {command}");
        }
        assert!(text.contains(get_bot_version()));
    }
}
