pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod providers;

pub use commands::{CommandContext, CommandDispatcher, DEFAULT_OUTPUT_DIR, create_command_registry};
pub use config::Config;
pub use crate::core::error::SalesCallError;
pub use providers::{ChatProvider, CompletionResult, Message, Role};
