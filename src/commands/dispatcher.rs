use super::{
    CommandContext,
    handler::{AnswerCommand, CommandHandler, GenerateCommand, SummarizeCommand},
    registry::CommandRegistry,
};
use crate::config::Config;
use crate::core::error::SalesCallError;
use crate::providers::ChatProvider;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn usage(&self) -> String {
        let mut usage = String::from("Usage: salescall <command> [file_name] [query]\n\nCommands:");
        for line in self.registry.help_lines() {
            usage.push_str("\n  ");
            usage.push_str(line);
        }
        usage
    }

    /// Looks up the handler for `command` without touching config or network.
    pub fn resolve(&self, command: Option<&str>) -> Result<Arc<dyn CommandHandler>, SalesCallError> {
        let command = command
            .filter(|c| !c.is_empty())
            .ok_or_else(|| SalesCallError::Usage(self.usage()))?;

        self.registry.get(command).ok_or_else(|| {
            SalesCallError::Usage(format!(
                "Unknown command '{}'. Command should be one of: {}",
                command,
                self.get_command_names().join(", ")
            ))
        })
    }

    /// Runs one command end to end: resolve, validate arguments, load config,
    /// build the gateway, execute.
    pub async fn run<F>(
        &self,
        command: Option<&str>,
        args: &[String],
        config_path: &Path,
        output_dir: &str,
        make_provider: F,
        out: &mut (dyn Write + Send),
    ) -> Result<(), SalesCallError>
    where
        F: FnOnce(&Config) -> Result<Box<dyn ChatProvider>, SalesCallError>,
    {
        let handler = self.resolve(command)?;
        handler.validate(args)?;
        let config = Config::load(config_path)?;
        let gateway = make_provider(&config)?;
        tracing::debug!(command = ?command, model = gateway.model(), "dispatching command");

        let mut ctx = CommandContext {
            gateway: gateway.as_ref(),
            output_dir,
            out,
        };
        handler.execute(&mut ctx, args).await
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("generate", GenerateCommand);
    registry.register("summarize", SummarizeCommand);
    registry.register("answer", AnswerCommand);

    CommandDispatcher::new(Arc::new(registry))
}
