//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 3.0.0: MarkovHandler and ReactionHandler (reactionrank, emoji)
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod markov;
pub mod reaction;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;
use super::registry::CommandRegistry;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be collected into a CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(markov::MarkovHandler),
        Arc::new(reaction::ReactionHandler),
    ]
}

/// Registry with every handler from [`create_all_handlers`]
pub fn create_registry() -> CommandRegistry {
    create_all_handlers().into_iter().collect()
}
