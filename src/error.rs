//! Error taxonomy for the sequence pipeline and settings bootstrap.
//!
//! Model-call failures (`LlmError`) never leave the generator; they are
//! folded into the fallback result. Everything here that does reach the HTTP
//! layer maps to exactly one status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceError {
    /// Prompt was empty after trimming.
    #[error("Missing or empty prompt")]
    EmptyPrompt,

    /// No model credential is configured. Deployment error, not transient.
    #[error("model credential is not configured (set {env_var})")]
    MissingCredential { env_var: String },

    #[error("{0}")]
    Internal(String),
}

impl SequenceError {
    pub fn status_code(&self) -> u16 {
        match self {
            SequenceError::EmptyPrompt => 400,
            SequenceError::MissingCredential { .. } | SequenceError::Internal(_) => 500,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid bind address {0}")]
    BindAddress(String),
}
