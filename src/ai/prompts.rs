//! Fixed instruction text sent as the system message of every sequence call.
//!
//! The fallback handling in `ai::sequence` relies on the model following these
//! rules (JSON only, default to idle), so the wording is part of the contract.

use crate::animation::AnimationCatalog;
use std::sync::LazyLock;

const DIRECTOR_INTRO: &str = "You are an animation director that converts free-text prompts into short, funny animation sequences.";

const OUTPUT_SHAPE: &str = r#"You must always respond in JSON format with this structure:
{
    "inferred_mechanic": "<string, e.g. dance, run, cry, fight, idle>",
    "animation_candidates": [<list of related animations>],
    "ordered_sequence": [<3-6 animation names that make narrative sense>],
    "vibe": "<emotional tone: happy, sad, angry, excited, neutral, silly, dramatic>",
    "control_suggestion": "<control type: auto, movement, button:ACTION, or interactive>"
}"#;

const GUIDELINES: &[&str] = &[
    "Understand the user's text emotionally and contextually.",
    "Choose animations that fit the vibe and context.",
    "Keep ordered_sequence between 3-6 animations that tell a story with a beginning, middle, and end.",
    "Set \"vibe\" to match the emotional tone (e.g., sad for \"i hate my life\", silly for \"twerking\").",
    concat!(
        "Set \"control_suggestion\":\n",
        "  * \"auto\" = animations play automatically in sequence (default for most story-based prompts)\n",
        "  * \"movement\" = user controls walking/running/jumping during the sequence\n",
        "  * \"button:ACTION\" = create a clickable button to trigger a single repeatable ACTION (e.g., \"button:twerk\" for \"donald trump twerking\")\n",
        "  * \"interactive\" = create buttons for multiple actions the user can choose (e.g., \"dance challenge\")"
    ),
    "For story-based prompts with movement (like \"went to work\", \"walking somewhere\"), include walk/run animations at the start.",
    "For dramatic endings, include impactful final animations (like micDrop, faint, victoryJump, dramaticCollapse).",
    "Mix animation types to tell better stories: movement (walk, run) + emotion (face animations) + action (micDrop, dance).",
    "For prompts about specific actions (like \"twerking\", \"dancing with button\"), suggest button-based control. For challenges or selections (like \"dance challenge\"), use \"interactive\" mode.",
    "Always respond in exactly the JSON structure above. Never output plain text, extra commentary, or markdown code fences.",
    "If unsure, default to ordered_sequence: [\"idle\"], vibe: \"neutral\", control_suggestion: \"auto\".",
];

static SEQUENCE_DIRECTOR_PROMPT: LazyLock<String> =
    LazyLock::new(|| build_director_prompt(AnimationCatalog::global()));

/// The process-wide instruction, rendered once from the global catalog.
pub fn sequence_director_prompt() -> &'static str {
    &SEQUENCE_DIRECTOR_PROMPT
}

/// Render the instruction for a given catalog. Pure; no I/O.
pub fn build_director_prompt(catalog: &AnimationCatalog) -> String {
    let guidelines = GUIDELINES
        .iter()
        .map(|g| format!("- {}", g))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n{}\n\nAvailable animations:\n{}\n\nGuidelines:\n{}",
        DIRECTOR_INTRO,
        OUTPUT_SHAPE,
        catalog.render_list(),
        guidelines
    )
}
