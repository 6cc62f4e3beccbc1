use crate::config::AppConfig;
use crate::llm::openai::OpenAIClient;
use crate::llm::{LlmConfig, LlmError, LlmParams, LlmProvider, LlmService, Message, OpenAIProvider};
use crate::server::AppState;
use async_trait::async_trait;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-test-key";
pub const INDEX_HTML: &str = "<!doctype html><title>player</title>";

// ── Project layout ──────────────────────────────────────────

/// Temp project root:
///
/// ```text
/// <tmp>/secret.txt                 (outside every served root)
/// <tmp>/public/index.html
/// <tmp>/public/player.js
/// <tmp>/shared/common.css
/// <tmp>/assets/hero/hero.atlas
/// <tmp>/assets/hero/hero.png
/// <tmp>/assets/hero/hands on hips.json
/// ```
pub fn project_root() -> TempDir {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let root = tmp.path();
    for dir in ["public", "shared", "assets/hero"] {
        std::fs::create_dir_all(root.join(dir)).unwrap();
    }
    std::fs::write(root.join("secret.txt"), "do not serve").unwrap();
    std::fs::write(root.join("public/index.html"), INDEX_HTML).unwrap();
    std::fs::write(root.join("public/player.js"), "console.log('player');").unwrap();
    std::fs::write(root.join("shared/common.css"), "body { margin: 0; }").unwrap();
    std::fs::write(root.join("assets/hero/hero.atlas"), "hero.png\nsize: 64,64").unwrap();
    std::fs::write(root.join("assets/hero/hero.png"), make_png_bytes(64)).unwrap();
    std::fs::write(root.join("assets/hero/hands on hips.json"), "{\"frames\":12}").unwrap();
    tmp
}

/// PNG magic header padded to `size`.
pub fn make_png_bytes(size: usize) -> Vec<u8> {
    let mut bytes: Vec<u8> = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(size.max(8), 0xAA);
    bytes
}

pub fn config_for(tmp: &TempDir) -> AppConfig {
    AppConfig {
        root_dir: tmp.path().to_path_buf(),
        llm: LlmConfig {
            api_key: Some(TEST_API_KEY.to_string()),
            ..LlmConfig::default()
        },
        ..AppConfig::default()
    }
}

// ── Model backends ──────────────────────────────────────────

/// Real `OpenAIClient` pointed at a wiremock server. Bypasses the system
/// proxy, which may interfere with localhost connections.
pub fn mock_provider(base_url: String) -> Arc<dyn LlmProvider> {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let client = OpenAIClient::with_http_client(
        http,
        TEST_API_KEY.to_string(),
        Some(base_url),
        Some("gpt-4o-mini".to_string()),
    );
    Arc::new(OpenAIProvider::from_client(client))
}

pub fn state_with_mock(tmp: &TempDir, mock: &MockServer) -> AppState {
    let config = config_for(tmp);
    let llm = LlmService::with_provider(
        config.llm.clone(),
        mock_provider(format!("{}/v1", mock.uri())),
    );
    AppState::with_llm(config, llm)
}

/// Provider that always answers with the same text.
pub struct FixedReply(pub String);

#[async_trait]
impl LlmProvider for FixedReply {
    async fn chat(&self, _: Vec<Message>, _: Option<LlmParams>) -> Result<String, LlmError> {
        Ok(self.0.clone())
    }

    fn id(&self) -> &str {
        "fixed"
    }
}

pub fn state_with_reply(tmp: &TempDir, reply: &str) -> AppState {
    let config = config_for(tmp);
    let llm = LlmService::with_provider(config.llm.clone(), Arc::new(FixedReply(reply.to_string())));
    AppState::with_llm(config, llm)
}

/// OpenAI chat-completions response wrapping `content`.
pub fn chat_completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

pub fn twerk_reply() -> String {
    serde_json::json!({
        "inferred_mechanic": "dance",
        "animation_candidates": ["twerk", "dance", "moonwalk"],
        "ordered_sequence": ["walk", "twerk", "moonwalk", "victoryJump"],
        "vibe": "silly",
        "control_suggestion": "button:twerk"
    })
    .to_string()
}

pub fn fallback_json() -> serde_json::Value {
    serde_json::json!({
        "ordered_sequence": ["idle"],
        "vibe": "neutral",
        "control_suggestion": "auto",
        "inferred_mechanic": null,
        "animation_candidates": null
    })
}

pub fn body_json(resp: &warp::http::Response<warp::hyper::body::Bytes>) -> serde_json::Value {
    serde_json::from_slice(resp.body()).expect("response body must be JSON")
}
