//! Slash command routing table
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Built by collecting handlers; duplicate names are logged
//! - 1.0.0: Initial implementation for handler dispatch

use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Routes a slash command name to the handler that declared it.
///
/// A handler serving several commands (`/reactionrank` and `/emoji`) is shared
/// between their entries. When two handlers declare the same name the later one wins.
#[derive(Clone)]
pub struct CommandRegistry {
    routes: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.routes.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }
}

impl FromIterator<Arc<dyn SlashCommandHandler>> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = Arc<dyn SlashCommandHandler>>>(handlers: I) -> Self {
        let mut routes = HashMap::new();
        for handler in handlers {
            for &name in handler.command_names() {
                if routes.insert(name, Arc::clone(&handler)).is_some() {
                    warn!("/{name} declared by more than one handler");
                }
            }
        }
        Self { routes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use anyhow::Result;
    use async_trait::async_trait;
    use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
    use serenity::prelude::Context;
    use uuid::Uuid;

    struct NamedHandler(&'static [&'static str]);

    #[async_trait]
    impl SlashCommandHandler for NamedHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.0
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _serenity_ctx: &Context,
            _command: &ApplicationCommandInteraction,
            _request_id: Uuid,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn registry(
        first: &'static [&'static str],
        second: &'static [&'static str],
    ) -> CommandRegistry {
        [first, second]
            .into_iter()
            .map(|names| Arc::new(NamedHandler(names)) as Arc<dyn SlashCommandHandler>)
            .collect()
    }

    #[test]
    fn test_shared_handler_serves_every_declared_name() {
        let registry = registry(&["reactionrank", "emoji"], &["markov"]);

        assert!(registry.contains("reactionrank"));
        assert!(registry.contains("emoji"));
        assert!(registry.get("markov").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_later_handler_wins_on_duplicate_name() {
        let registry = registry(&["ping"], &["ping", "help"]);
        let handler = registry.get("ping").unwrap();
        assert_eq!(handler.command_names(), &["ping", "help"]);
    }

    #[test]
    fn test_all_handlers_cover_commands() {
        let registry = crate::commands::handlers::create_registry();
        for name in ["markov", "reactionrank", "emoji", "ping", "help"] {
            assert!(registry.contains(name), "missing handler for /{name}");
        }
    }
}
