use crate::core::error::SalesCallError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "./config/default.json";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-16k";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAIConfig {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Upper bound on a single completion request; unset waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub openai: OpenAIConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config, SalesCallError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SalesCallError::Config(format!("Read {}: {}", path.display(), e)))?;
        let config = serde_json::from_str::<Config>(&contents)
            .map_err(|e| SalesCallError::Config(format!("Parse {}: {}", path.display(), e)))?;

        if matches!(config.openai.model.as_deref(), Some(m) if m.trim().is_empty()) {
            return Err(SalesCallError::Config(format!(
                "Parse {}: openai.model must not be empty",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), model = config.model(), "loaded configuration");
        Ok(config)
    }

    pub fn model(&self) -> &str {
        self.openai.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}
