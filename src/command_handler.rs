//! # Slash Command Dispatcher
//!
//! Assigns a request id, applies the per-user rate limit and routes each
//! interaction to its registered handler.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 3.0.0: Dispatch through CommandRegistry only
//! - 1.0.0: Initial implementation

use anyhow::Result;
use log::{debug, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handlers::create_registry;
use crate::commands::registry::CommandRegistry;
use crate::features::rate_limiting::RateLimiter;

pub const RATE_LIMIT_MESSAGE: &str = "You're sending commands too quickly! Please slow down.";

#[derive(Clone)]
pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
    rate_limiter: Arc<RateLimiter>,
}

impl CommandHandler {
    pub fn new(context: CommandContext, rate_limit_per_minute: usize) -> Self {
        CommandHandler {
            context: Arc::new(context),
            registry: create_registry(),
            rate_limiter: Arc::new(RateLimiter::per_minute(rate_limit_per_minute)),
        }
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let user_id = command.user.id.0;
        let guild_id = command
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        info!(
            "[{request_id}] Slash command received | Command: {} | User: {user_id} | Channel: {} | Guild: {guild_id}",
            command.data.name, command.channel_id
        );

        if !self.rate_limiter.check_rate_limit(user_id).await {
            warn!(
                "[{request_id}] Rate limit exceeded for user {user_id}, retry in {:?}",
                self.rate_limiter.retry_after(user_id)
            );
            command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content(RATE_LIMIT_MESSAGE).ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        }
        debug!("[{request_id}] Rate limit check passed");

        match self.registry.get(&command.data.name) {
            Some(handler) => {
                handler
                    .handle(Arc::clone(&self.context), ctx, command, request_id)
                    .await
            }
            None => {
                warn!("[{request_id}] Unknown command: {}", command.data.name);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::slash::create_slash_commands;
    use crate::database::Database;
    use crate::features::emoji::EmojiCatalog;
    use crate::features::markov::MarkovService;
    use std::time::Duration;

    #[tokio::test]
    async fn test_every_defined_command_has_a_handler() {
        let database = Database::new(":memory:").await.unwrap();
        let markov = MarkovService::new(".", database.clone(), Duration::from_secs(1));
        let handler = CommandHandler::new(
            CommandContext::new(database, Arc::new(EmojiCatalog::empty()), markov),
            10,
        );

        for command in create_slash_commands() {
            let name = command.0.get("name").unwrap().as_str().unwrap().to_string();
            assert!(handler.registry.contains(&name), "no handler for /{name}");
        }
    }
}
