//! Sequence Generator — prompt in, structurally valid animation plan out.
//!
//! The model's reply is untrusted input. It is parsed, then every field is
//! filled from an explicit default table. Any call or parse failure collapses
//! into `SequenceResult::fallback()`; only a missing credential (a deployment
//! error) is reported back as an error.

use crate::ai::prompts::sequence_director_prompt;
use crate::animation::{AnimationCatalog, IDLE};
use crate::error::SequenceError;
use crate::llm::provider::{LlmParams, Message};
use crate::llm::service::LlmService;
use crate::models::sequence::{SequenceResult, DEFAULT_CONTROL, DEFAULT_VIBE};
use serde_json::{Map, Value};

/// Sampling temperature for every sequence call.
pub const SEQUENCE_TEMPERATURE: f32 = 0.8;

/// Preferred story length; outside this range is logged, not corrected.
pub const TARGET_SEQUENCE_LEN: std::ops::RangeInclusive<usize> = 3..=6;

/// What the generator produced. Both arms carry a ready-to-return result.
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceOutcome {
    /// Parsed from the model reply and normalized.
    Generated(SequenceResult),
    /// Model call or parse failed; carries the fixed fallback.
    Fallback(SequenceResult),
}

impl SequenceOutcome {
    fn fallback() -> Self {
        SequenceOutcome::Fallback(SequenceResult::fallback())
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SequenceOutcome::Fallback(_))
    }

    pub fn result(&self) -> &SequenceResult {
        match self {
            SequenceOutcome::Generated(r) | SequenceOutcome::Fallback(r) => r,
        }
    }

    pub fn into_result(self) -> SequenceResult {
        match self {
            SequenceOutcome::Generated(r) | SequenceOutcome::Fallback(r) => r,
        }
    }
}

#[derive(Clone)]
pub struct SequenceGenerator {
    llm: LlmService,
}

impl SequenceGenerator {
    pub fn new(llm: LlmService) -> Self {
        Self { llm }
    }

    pub async fn generate(&self, prompt: &str) -> Result<SequenceOutcome, SequenceError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SequenceError::EmptyPrompt);
        }

        let provider = self.llm.provider().await?;

        let messages = vec![
            Message::system(sequence_director_prompt()),
            Message::user(prompt),
        ];
        let params = LlmParams {
            temperature: Some(SEQUENCE_TEMPERATURE),
            ..LlmParams::default()
        };

        let outcome = match provider.chat(messages, Some(params)).await {
            Ok(raw) => interpret_response(&raw),
            Err(e) => {
                tracing::warn!("[Sequence] Model call failed, using fallback: {}", e);
                SequenceOutcome::fallback()
            }
        };

        let result = outcome.result();
        tracing::info!(
            fallback = outcome.is_fallback(),
            steps = result.ordered_sequence.len(),
            vibe = %result.vibe,
            control = %result.control_suggestion,
            "[Sequence] Created sequence"
        );
        Ok(outcome)
    }
}

/// Turn raw model text into an outcome. Never fails.
pub fn interpret_response(raw: &str) -> SequenceOutcome {
    let json_str = strip_code_fences(raw);
    match serde_json::from_str::<Value>(json_str) {
        Ok(Value::Object(map)) => SequenceOutcome::Generated(normalize(&map)),
        Ok(other) => {
            tracing::warn!(
                "[Sequence] Model returned JSON {} instead of an object, using fallback",
                json_kind(&other)
            );
            SequenceOutcome::fallback()
        }
        Err(e) => {
            tracing::warn!(
                "[Sequence] Failed to parse model response: {}. Raw: {}",
                e,
                preview(raw)
            );
            SequenceOutcome::fallback()
        }
    }
}

fn normalize(map: &Map<String, Value>) -> SequenceResult {
    let ordered_sequence = string_list(map.get("ordered_sequence"))
        .filter(|seq| !seq.is_empty())
        .unwrap_or_else(|| vec![IDLE.to_string()]);

    if !TARGET_SEQUENCE_LEN.contains(&ordered_sequence.len()) {
        tracing::warn!(
            "[Sequence] ordered_sequence has {} animations (expected {}-{})",
            ordered_sequence.len(),
            TARGET_SEQUENCE_LEN.start(),
            TARGET_SEQUENCE_LEN.end()
        );
    }

    let catalog = AnimationCatalog::global();
    for name in ordered_sequence.iter().filter(|n| !catalog.contains(n)) {
        tracing::debug!("[Sequence] Model used unknown animation {:?}", name);
    }

    SequenceResult {
        ordered_sequence,
        vibe: non_blank_string(map.get("vibe")).unwrap_or_else(|| DEFAULT_VIBE.to_string()),
        control_suggestion: non_blank_string(map.get("control_suggestion"))
            .unwrap_or_else(|| DEFAULT_CONTROL.to_string()),
        inferred_mechanic: non_blank_string(map.get("inferred_mechanic")),
        animation_candidates: string_list(map.get("animation_candidates")),
    }
}

/// Strings of a JSON array, trimmed, blanks and non-strings dropped.
/// `None` when the value is missing or not an array.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn non_blank_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Strip markdown code fences if present.
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    if trimmed.starts_with("```") {
        trimmed
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
    } else {
        trimmed
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn preview(raw: &str) -> &str {
    match raw.char_indices().nth(200) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}
