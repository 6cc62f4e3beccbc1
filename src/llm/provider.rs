//! LLM Provider trait — common interface for chat-completion backends.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use crate::llm::openai::Message;

// ── Common Parameters ──────────────────────────────────
#[derive(Debug, Clone, Default)]
pub struct LlmParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Failure of a single model call. Never shown to API callers.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Common interface for LLM providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Non-streaming chat completion, returning the raw message text.
    async fn chat(
        &self,
        messages: Vec<Message>,
        options: Option<LlmParams>,
    ) -> Result<String, LlmError>;

    /// Provider identifier (e.g. "openai").
    fn id(&self) -> &str;
}

// ── OpenAI adapter ─────────────────────────────────────

use crate::llm::openai::OpenAIClient;

/// Wraps `OpenAIClient` to implement `LlmProvider`.
pub struct OpenAIProvider {
    client: OpenAIClient,
    provider_id: String,
}

impl OpenAIProvider {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self::from_client(OpenAIClient::new(api_key, base_url, model, timeout))
    }

    pub fn from_client(client: OpenAIClient) -> Self {
        Self {
            client,
            provider_id: "openai".to_string(),
        }
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.provider_id = id;
        self
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn chat(
        &self,
        messages: Vec<Message>,
        options: Option<LlmParams>,
    ) -> Result<String, LlmError> {
        self.client.chat(messages, options).await
    }

    fn id(&self) -> &str {
        &self.provider_id
    }
}
