pub mod dispatcher;
pub mod handler;
pub mod prompts;
pub mod registry;

use crate::providers::ChatProvider;
use std::io::Write;

pub use dispatcher::{CommandDispatcher, create_command_registry};

pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Everything a handler needs for one run.
pub struct CommandContext<'a> {
    pub gateway: &'a dyn ChatProvider,
    pub output_dir: &'a str,
    pub out: &'a mut (dyn Write + Send),
}
