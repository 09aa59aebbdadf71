use crate::core::error::SalesCallError;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A validated completion: `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub id: String,
    pub created_at: i64,
    pub text: String,
}

/// The only component that talks to the remote chat completion service.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one prompt and return the normalized first choice.
    async fn complete(&self, prompt: &[Message]) -> Result<CompletionResult, SalesCallError>;

    fn model(&self) -> &str;
}

pub mod base_client;
pub mod factory;
pub mod openai;
