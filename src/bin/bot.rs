use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use sekam::commands::{register_global_commands, register_guild_commands, CommandContext, CommandHandler};
use sekam::core::Config;
use sekam::database::Database;
use sekam::features::emoji::EmojiCatalog;
use sekam::features::markov::MarkovService;

const ERROR_MESSAGE: &str = "❌ Sorry, I encountered an error processing your command. Please try again.";

struct Handler {
    command_handler: Arc<CommandHandler>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(shard) = ready.shard {
            info!("⚡ Shard: {}/{}", shard[0] + 1, shard[1]);
        }

        // Register slash commands - use guild commands for development (instant), global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands for guild {guild_id} (instant update)");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands globally (may take up to 1 hour to propagate)");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            if let Err(e) = self
                .command_handler
                .handle_slash_command(&ctx, &command)
                .await
            {
                error!("Error handling slash command '{}': {e:#}", command.data.name);

                // Try to edit the deferred response, fallback to new response if that fails
                if command
                    .edit_original_interaction_response(&ctx.http, |response| {
                        response.content(ERROR_MESSAGE)
                    })
                    .await
                    .is_err()
                {
                    let _ = command
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| message.content(ERROR_MESSAGE))
                        })
                        .await;
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting SEKAM v{}...", sekam::features::get_bot_version());

    let database = Database::new(&config.database_path).await?;

    let emoji_catalog = Arc::new(EmojiCatalog::load_or_empty(&config.emoji_json_path));
    if emoji_catalog.is_empty() {
        warn!("Emoji catalog is empty; only custom server emoji will resolve");
    } else {
        info!("Loaded {} emoji names", emoji_catalog.len());
    }

    let markov = MarkovService::new(
        config.markov_data_dir.clone(),
        database.clone(),
        config.markov_timeout,
    );
    info!(
        "Markov snapshots from {} (timeout {:?})",
        config.markov_data_dir.display(),
        config.markov_timeout
    );

    let command_handler = CommandHandler::new(
        CommandContext::new(database, emoji_catalog, markov),
        config.rate_limit_per_minute,
    );

    let handler = Handler {
        command_handler: Arc::new(command_handler),
        guild_id: config.discord_guild_id.map(GuildId),
    };

    let intents = GatewayIntents::GUILDS;

    // Build the Discord client with proper gateway configuration
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
