//! Request/response contract for `/api/sequence`.

use crate::animation::IDLE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VIBE: &str = "neutral";
pub const DEFAULT_CONTROL: &str = "auto";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceRequest {
    pub prompt: String,
}

impl SequenceRequest {
    /// Trimmed prompt, or `None` when nothing but whitespace was sent.
    pub fn normalized_prompt(&self) -> Option<&str> {
        let trimmed = self.prompt.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// One generated animation plan. Built per request, never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceResult {
    pub ordered_sequence: Vec<String>,
    pub vibe: String,
    pub control_suggestion: String,
    pub inferred_mechanic: Option<String>,
    pub animation_candidates: Option<Vec<String>>,
}

impl SequenceResult {
    /// The fixed result returned whenever the model cannot be trusted.
    pub fn fallback() -> Self {
        Self {
            ordered_sequence: vec![IDLE.to_string()],
            vibe: DEFAULT_VIBE.to_string(),
            control_suggestion: DEFAULT_CONTROL.to_string(),
            inferred_mechanic: None,
            animation_candidates: None,
        }
    }

    pub fn control_mode(&self) -> ControlMode {
        ControlMode::parse(&self.control_suggestion)
    }
}

// ── Control Suggestion ─────────────────────────────────

/// Typed view of `control_suggestion`. The wire value stays a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMode {
    Auto,
    Movement,
    /// `button:<ACTION>`; the action is not checked against the catalog.
    Button(String),
    Interactive,
    Other(String),
}

impl ControlMode {
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim();
        match value {
            "auto" => ControlMode::Auto,
            "movement" => ControlMode::Movement,
            "interactive" => ControlMode::Interactive,
            _ => match value.strip_prefix("button:") {
                Some(action) if !action.trim().is_empty() => {
                    ControlMode::Button(action.trim().to_string())
                }
                _ => ControlMode::Other(value.to_string()),
            },
        }
    }
}
