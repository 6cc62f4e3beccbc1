//! LLM Service — process-wide handle to the model provider.
//!
//! The provider is built lazily on first use and at most once; after that it
//! is shared read-only by every request.

use crate::error::SequenceError;
use crate::llm::llm_config::LlmConfig;
use crate::llm::provider::{LlmProvider, OpenAIProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

#[derive(Clone)]
pub struct LlmService {
    provider: Arc<OnceCell<Arc<dyn LlmProvider>>>,
    config: Arc<LlmConfig>,
}

impl LlmService {
    /// Lazy service. Nothing is checked until the first `provider()` call.
    pub fn from_config(config: LlmConfig) -> Self {
        Self {
            provider: Arc::new(OnceCell::new()),
            config: Arc::new(config),
        }
    }

    /// Service with an already-built provider (custom backends, tests).
    pub fn with_provider(config: LlmConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Arc::new(OnceCell::new_with(Some(provider))),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.provider.initialized()
    }

    /// The shared provider, built on first call.
    ///
    /// A missing credential fails immediately with `MissingCredential` and
    /// leaves the cell empty, so a later call re-checks the configuration.
    pub async fn provider(&self) -> Result<Arc<dyn LlmProvider>, SequenceError> {
        self.provider
            .get_or_try_init(|| async { build_provider(&self.config) })
            .await
            .cloned()
    }
}

/// Factory: build the OpenAI-compatible provider from config.
fn build_provider(cfg: &LlmConfig) -> Result<Arc<dyn LlmProvider>, SequenceError> {
    let api_key = cfg.resolve_api_key().ok_or_else(|| {
        let env_var = cfg.credential_env_var();
        tracing::error!("[LLM] No API key configured; set {}", env_var);
        SequenceError::MissingCredential { env_var }
    })?;

    tracing::info!(
        "[LLM] Initializing OpenAI provider: base_url={}, model={}",
        cfg.base_url(),
        cfg.model()
    );
    Ok(Arc::new(OpenAIProvider::new(
        api_key,
        Some(cfg.base_url().to_string()),
        Some(cfg.model().to_string()),
        Duration::from_secs(cfg.timeout_secs),
    )))
}
