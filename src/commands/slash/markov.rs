//! # Markov Command
//!
//! Generates text from a user's, a channel's or the server-wide word statistics.
//!
//! - **Version**: 2.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.1.0: `mode` option for trigram generation
//! - 2.0.0: `scope` and `channel_id` options
//! - 1.0.0: Initial implementation

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Scope choices as (display name, value)
pub const SCOPE_CHOICES: &[(&str, &str)] = &[
    ("Your messages", "self"),
    ("This channel", "channel"),
    ("Whole server", "global"),
];

/// Mode choices as (display name, value)
pub const MODE_CHOICES: &[(&str, &str)] = &[
    ("Normal (bigram)", "normal"),
    ("Precise (trigram)", "precise"),
];

/// Longest accepted start word
pub const MAX_START_LENGTH: u16 = 100;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_markov_command()]
}

fn create_markov_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("markov")
        .description("Generate a sentence from past messages")
        .create_option(|option| {
            option
                .name("scope")
                .description("Whose messages to learn from (default: yours)")
                .kind(CommandOptionType::String)
                .required(false);
            for (name, value) in SCOPE_CHOICES {
                option.add_string_choice(name, value);
            }
            option
        })
        .create_option(|option| {
            option
                .name("mode")
                .description("Generation mode (default: normal)")
                .kind(CommandOptionType::String)
                .required(false);
            for (name, value) in MODE_CHOICES {
                option.add_string_choice(name, value);
            }
            option
        })
        .create_option(|option| {
            option
                .name("start")
                .description("Word to start the sentence with")
                .kind(CommandOptionType::String)
                .required(false)
                .max_length(MAX_START_LENGTH)
        })
        .create_option(|option| {
            option
                .name("channel_id")
                .description("Generate from another channel by id")
                .kind(CommandOptionType::String)
                .required(false)
        });
    command
}
