//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Emoji catalog and markov service replace the chat services
//! - 1.0.0: Initial implementation with core shared state

use crate::database::Database;
use crate::features::emoji::EmojiCatalog;
use crate::features::markov::MarkovService;
use log::warn;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Shared context for all command handlers
///
/// Contains the services needed by the command handlers:
/// - Database for reactions, the global bigram relation and the command log
/// - EmojiCatalog for alias resolution (read-only after startup)
/// - MarkovService for text generation
/// - Bot start time for uptime tracking
#[derive(Clone)]
pub struct CommandContext {
    pub database: Database,
    pub emoji_catalog: Arc<EmojiCatalog>,
    pub markov: MarkovService,
    pub start_time: Instant,
}

impl CommandContext {
    pub fn new(database: Database, emoji_catalog: Arc<EmojiCatalog>, markov: MarkovService) -> Self {
        Self {
            database,
            emoji_catalog,
            markov,
            start_time: Instant::now(),
        }
    }

    /// Write a command_log row; failures are logged, never surfaced to the user
    pub async fn log_result(&self, request_id: Uuid, user_id: u64, command: &str, result: &str) {
        if let Err(e) = self
            .database
            .log_command(&user_id.to_string(), command, result)
            .await
        {
            warn!("[{request_id}] Failed to log /{command} result {result}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }

    #[tokio::test]
    async fn test_log_result_writes_row() {
        let database = Database::new(":memory:").await.unwrap();
        let markov = MarkovService::new(".", database.clone(), Duration::from_secs(1));
        let ctx = CommandContext::new(database, Arc::new(EmojiCatalog::empty()), markov);

        ctx.log_result(Uuid::new_v4(), 42, "ping", "OK").await;
        assert!(ctx.start_time.elapsed() < Duration::from_secs(60));
    }
}
