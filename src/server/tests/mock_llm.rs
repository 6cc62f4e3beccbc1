use super::helpers::*;
use crate::llm::openai::{ChatCompletionRequest, Message, OpenAIClient};
use crate::llm::{LlmError, LlmParams};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(mock: &MockServer) -> OpenAIClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    OpenAIClient::with_http_client(
        http,
        TEST_API_KEY.to_string(),
        Some(format!("{}/v1/", mock.uri())),
        None,
    )
}

// ── Payload Structure ───────────────────────────────────────

#[test]
fn test_request_payload_structure() {
    let request = ChatCompletionRequest {
        model: "gpt-4o-mini".to_string(),
        messages: vec![Message::system("rules"), Message::user("hello")],
        stream: false,
        temperature: Some(0.8),
        max_tokens: None,
    };

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["model"], "gpt-4o-mini");
    assert_eq!(json["stream"], false);
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["content"], "hello");
    assert!(json.get("max_tokens").is_none(), "unset options are omitted");
}

// ── Client Against Mock Server ──────────────────────────────

#[tokio::test]
async fn test_chat_returns_message_content() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .and(body_partial_json(serde_json::json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body("{\"vibe\":\"sad\"}")))
        .expect(1)
        .mount(&mock)
        .await;

    let client = client_for(&mock);
    assert_eq!(client.model(), "gpt-4o-mini");
    let content = client
        .chat(
            vec![Message::user("i hate my life")],
            Some(LlmParams {
                temperature: Some(0.8),
                ..LlmParams::default()
            }),
        )
        .await
        .unwrap();
    assert_eq!(content, "{\"vibe\":\"sad\"}");
}

#[tokio::test]
async fn test_chat_surfaces_status_and_body() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&mock)
        .await;

    let err = client_for(&mock)
        .chat(vec![Message::user("x")], None)
        .await
        .unwrap_err();
    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_chat_does_not_retry() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock)
        .await;

    let result = client_for(&mock).chat(vec![Message::user("x")], None).await;
    assert!(matches!(result, Err(LlmError::Api { status: 503, .. })));
}

#[tokio::test]
async fn test_chat_without_content_is_decode_error() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&mock)
        .await;

    let result = client_for(&mock).chat(vec![Message::user("x")], None).await;
    assert!(matches!(result, Err(LlmError::Decode(_))));
}
