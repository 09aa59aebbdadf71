use super::{ChatProvider, CompletionResult, Message};
use crate::core::error::SalesCallError;
use crate::providers::base_client::ChatTransport;
use serde::{Deserialize, Serialize};

const FINISH_REASON_STOP: &str = "stop";

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatCompletionMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub created: i64,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub finish_reason: Option<String>,
    pub message: MessageContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub content: Option<String>,
}

pub struct OpenAIProvider {
    transport: Box<dyn ChatTransport>,
    model: String,
}

impl OpenAIProvider {
    pub fn new(transport: Box<dyn ChatTransport>, model: String) -> Self {
        Self { transport, model }
    }
}

impl From<&Message> for ChatCompletionMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

/// Checks the first choice and turns it into a [`CompletionResult`].
pub fn validate_response(
    response: ChatCompletionResponse,
) -> Result<CompletionResult, SalesCallError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| SalesCallError::Gateway("No choices in API response".to_string()))?;

    match choice.finish_reason.as_deref() {
        Some(FINISH_REASON_STOP) => {}
        Some(reason) => return Err(SalesCallError::UnexpectedFinishReason(reason.to_string())),
        None => return Err(SalesCallError::UnexpectedFinishReason("null".to_string())),
    }

    let text = match choice.message.content {
        Some(content) if !content.is_empty() => content,
        _ => return Err(SalesCallError::EmptyContent),
    };

    Ok(CompletionResult {
        id: response.id,
        created_at: response.created,
        text,
    })
}

#[async_trait::async_trait]
impl ChatProvider for OpenAIProvider {
    async fn complete(&self, prompt: &[Message]) -> Result<CompletionResult, SalesCallError> {
        if prompt.is_empty() {
            return Err(SalesCallError::Gateway(
                "Refusing to send an empty prompt".to_string(),
            ));
        }

        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: prompt.iter().map(ChatCompletionMessage::from).collect(),
        };

        let response = self.transport.send(&payload).await?;
        let result = validate_response(response)?;

        tracing::debug!(
            id = %result.id,
            created_at = %chrono::DateTime::from_timestamp(result.created_at, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| result.created_at.to_string()),
            chars = result.text.len(),
            "chat completion received"
        );
        Ok(result)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
