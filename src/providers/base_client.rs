use crate::core::error::SalesCallError;
use crate::providers::openai::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Moves one serialized chat completion request over the wire.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, SalesCallError>;
}

pub struct BaseApiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl BaseApiClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SalesCallError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for BaseApiClient {
    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, SalesCallError> {
        let url = format!("{}/chat/completions", self.endpoint);
        tracing::debug!(%url, model = %request.model, messages = request.messages.len(), "sending chat completion request");

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = builder.json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "chat completion request rejected");
            return Err(SalesCallError::Gateway(format!(
                "API returned {}: {}",
                status,
                body.trim()
            )));
        }

        let response_body = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&response_body)?;
        Ok(parsed)
    }
}
