use crate::config::{Config, DEFAULT_BASE_URL};
use crate::core::error::SalesCallError;
use crate::providers::{ChatProvider, base_client::BaseApiClient, openai::OpenAIProvider};
use std::env;
use std::time::Duration;

/// Builds the production gateway: reqwest transport plus the configured model.
///
/// Credentials come from `OPENAI_API_KEY`; `OPENAI_BASE_URL` overrides the
/// configured endpoint.
pub fn create_provider(config: &Config) -> Result<Box<dyn ChatProvider>, SalesCallError> {
    let base_url = env::var("OPENAI_BASE_URL")
        .ok()
        .filter(|url| !url.is_empty())
        .or_else(|| config.openai.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let api_key = env::var("OPENAI_API_KEY").ok().filter(|key| !key.is_empty());
    if api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; sending requests without credentials");
    }
    let timeout = config.openai.timeout_secs.map(Duration::from_secs);

    let transport = BaseApiClient::new(base_url, api_key, timeout)?;
    tracing::debug!(endpoint = transport.endpoint(), model = config.model(), "created provider");

    Ok(Box::new(OpenAIProvider::new(
        Box::new(transport),
        config.model().to_string(),
    )))
}
