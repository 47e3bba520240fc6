//! # Reaction Commands
//!
//! `/reactionrank` and `/emoji`, both taking an emoji in any accepted form.
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_reactionrank_command(), create_emoji_command()]
}

fn create_reactionrank_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("reactionrank")
        .description("Show your rank for reactions received with an emoji")
        .create_option(|option| {
            option
                .name("reaction")
                .description("Emoji, :name:, alias or custom emoji")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

fn create_emoji_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("emoji")
        .description("Show an emoji's base name and every variant counted with it")
        .create_option(|option| {
            option
                .name("reaction")
                .description("Emoji, :name:, alias or custom emoji")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}
