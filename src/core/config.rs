//! Environment configuration
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Emoji master table, markov data directory and timeout settings
//! - 1.0.0: Initial creation

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Register commands on this guild only (faster propagation while developing)
    pub discord_guild_id: Option<u64>,
    pub database_path: String,
    pub log_level: String,
    pub emoji_json_path: PathBuf,
    /// Directory containing `user_markov/` and `channel_markov/`
    pub markov_data_dir: PathBuf,
    pub markov_timeout: Duration,
    pub rate_limit_per_minute: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token =
            get("DISCORD_TOKEN").ok_or_else(|| anyhow!("DISCORD_TOKEN must be set"))?;

        Ok(Self {
            discord_token,
            discord_guild_id: parse_optional(get("DISCORD_GUILD_ID"), "DISCORD_GUILD_ID")?,
            database_path: get("DATABASE_PATH").unwrap_or_else(|| "sekam.db".to_string()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            emoji_json_path: get("EMOJI_JSON_PATH")
                .unwrap_or_else(|| "discord-emojis.pretty.json".to_string())
                .into(),
            markov_data_dir: get("MARKOV_DATA_DIR").unwrap_or_else(|| ".".to_string()).into(),
            markov_timeout: Duration::from_secs(
                parse_optional(get("MARKOV_TIMEOUT_SECS"), "MARKOV_TIMEOUT_SECS")?.unwrap_or(60),
            ),
            rate_limit_per_minute: parse_optional(
                get("RATE_LIMIT_PER_MINUTE"),
                "RATE_LIMIT_PER_MINUTE",
            )?
            .unwrap_or(10),
        })
    }
}

fn parse_optional<T>(value: Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .map(|v| v.trim().parse::<T>().with_context(|| format!("{key} is not valid: {v:?}")))
        .transpose()
}
