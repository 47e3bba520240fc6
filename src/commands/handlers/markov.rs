//! Markov command handler
//!
//! Handles: markov
//!
//! - **Version**: 2.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.1.0: Precise (trigram) mode with bigram fallback
//! - 2.0.0: Per-channel snapshots and `channel_id` option
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use serenity::builder::CreateEmbed;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::core::embeds::{error_embed, markov_embed};
use crate::features::markov::{
    compact_newlines, GenerationOptions, MarkovOutcome, MarkovRequest, MarkovSource, NgramOrder,
    SnapshotScope,
};

pub const NO_DATA_MESSAGE: &str = "Not enough data to generate text yet.";
pub const TIMEOUT_MESSAGE: &str = "Generation timed out. Please try again later.";

/// Raw `channel_id` option that is not a Discord id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChannelId(pub String);

impl fmt::Display for InvalidChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid channel id.", self.0)
    }
}

/// Option values of one `/markov` invocation
#[derive(Debug, Default, Clone)]
pub struct MarkovOptions {
    pub scope: Option<String>,
    pub mode: Option<String>,
    pub start: Option<String>,
    pub channel_id: Option<String>,
}

/// Resolved request plus the scope label shown in the reply
#[derive(Debug, Clone)]
pub struct ParsedMarkov {
    pub request: MarkovRequest,
    pub scope_label: String,
}

/// Map command options to a generation request.
///
/// An explicit `channel_id` wins over `scope`. The global scope only has bigram data,
/// so `mode` is ignored there.
pub fn parse_options(
    options: MarkovOptions,
    user_id: u64,
    current_channel_id: u64,
) -> Result<ParsedMarkov, InvalidChannelId> {
    let order = match options.mode.as_deref() {
        Some("precise") => NgramOrder::Trigram,
        _ => NgramOrder::Bigram,
    };

    let (source, scope_label) = match options.channel_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            let id = raw
                .parse::<u64>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| InvalidChannelId(raw.to_string()))?;
            (MarkovSource::Snapshot(SnapshotScope::Channel(id)), format!("<#{id}>"))
        }
        _ => match options.scope.as_deref() {
            Some("channel") => (
                MarkovSource::Snapshot(SnapshotScope::Channel(current_channel_id)),
                format!("<#{current_channel_id}>"),
            ),
            Some("global") => (MarkovSource::Global, "server".to_string()),
            _ => (
                MarkovSource::Snapshot(SnapshotScope::User(user_id)),
                format!("<@{user_id}>"),
            ),
        },
    };

    let order = match source {
        MarkovSource::Global => NgramOrder::Bigram,
        MarkovSource::Snapshot(_) => order,
    };

    Ok(ParsedMarkov {
        request: MarkovRequest {
            source,
            order,
            options: GenerationOptions::default()
                .with_start_word(options.start.map(|s| s.trim().to_string())),
        },
        scope_label,
    })
}

/// Handler for the markov command
pub struct MarkovHandler;

#[async_trait]
impl SlashCommandHandler for MarkovHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["markov"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        let user_id = command.user.id.0;
        let options = &command.data.options;
        let raw = MarkovOptions {
            scope: get_string_option(options, "scope"),
            mode: get_string_option(options, "mode"),
            start: get_string_option(options, "start"),
            channel_id: get_string_option(options, "channel_id"),
        };

        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await
            .map_err(|e| {
                error!("[{request_id}] Failed to defer interaction: {e}");
                anyhow::anyhow!("Failed to defer interaction: {e}")
            })?;

        let parsed = match parse_options(raw, user_id, command.channel_id.0) {
            Ok(parsed) => parsed,
            Err(invalid) => {
                info!("[{request_id}] Rejected channel id {:?}", invalid.0);
                self.reply(serenity_ctx, command, error_embed(&invalid.to_string()))
                    .await?;
                ctx.log_result(request_id, user_id, "markov", "INVALID_CHANNEL_ID")
                    .await;
                return Ok(());
            }
        };

        info!(
            "[{request_id}] Generating {} text for {:?}",
            parsed.request.order.as_str(),
            parsed.request.source
        );

        let (embed, result) = match ctx.markov.generate(parsed.request).await? {
            MarkovOutcome::Generated { text, order } => (
                markov_embed(&compact_newlines(&text), &parsed.scope_label, order),
                "OK",
            ),
            MarkovOutcome::NoData => (error_embed(NO_DATA_MESSAGE), "NO_DATA"),
            MarkovOutcome::TimedOut => (error_embed(TIMEOUT_MESSAGE), "TIMEOUT"),
        };

        self.reply(serenity_ctx, command, embed).await?;
        ctx.log_result(request_id, user_id, "markov", result).await;
        info!("[{request_id}] Markov command completed: {result}");
        Ok(())
    }
}

impl MarkovHandler {
    async fn reply(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        embed: CreateEmbed,
    ) -> Result<()> {
        command
            .edit_original_interaction_response(&serenity_ctx.http, |r| r.set_embed(embed))
            .await?;
        Ok(())
    }
}
