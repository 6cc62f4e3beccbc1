pub mod llm_config;
pub mod openai;
pub mod provider;
pub mod service;

pub use llm_config::LlmConfig;
pub use provider::{LlmError, LlmParams, LlmProvider, Message, OpenAIProvider};
pub use service::LlmService;
