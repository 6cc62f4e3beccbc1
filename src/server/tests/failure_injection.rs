use super::helpers::*;
use crate::llm::LlmService;
use crate::server::{routes, AppState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn post_prompt(state: AppState, prompt: &str) -> warp::http::Response<warp::hyper::body::Bytes> {
    warp::test::request()
        .method("POST")
        .path("/api/sequence")
        .json(&serde_json::json!({ "prompt": prompt }))
        .reply(&routes(state))
        .await
}

async fn mock_replying(template: ResponseTemplate) -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(template)
        .expect(1)
        .mount(&mock)
        .await;
    mock
}

// ── Model Failures Become Fallback ──────────────────────────

#[tokio::test]
async fn test_upstream_errors_yield_fallback() {
    for status in [400, 401, 403, 429, 500, 503] {
        let tmp = project_root();
        let mock = mock_replying(
            ResponseTemplate::new(status).set_body_json(serde_json::json!({
                "error": { "message": "injected", "type": "server_error" }
            })),
        )
        .await;

        let resp = post_prompt(state_with_mock(&tmp, &mock), "run away from a bear").await;
        assert_eq!(resp.status(), 200, "upstream {}", status);
        assert_eq!(body_json(&resp), fallback_json(), "upstream {}", status);
    }
}

#[tokio::test]
async fn test_non_json_content_yields_fallback() {
    let tmp = project_root();
    let mock = mock_replying(ResponseTemplate::new(200).set_body_json(chat_completion_body(
        "Here's a fun sequence: walk, twerk, micDrop!",
    )))
    .await;

    let resp = post_prompt(state_with_mock(&tmp, &mock), "donald trump twerking on the moon").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(&resp), fallback_json());
}

#[tokio::test]
async fn test_unexpected_envelope_yields_fallback() {
    let bodies = [
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })),
    ];
    for template in bodies {
        let tmp = project_root();
        let mock = mock_replying(template).await;
        let resp = post_prompt(state_with_mock(&tmp, &mock), "dance challenge").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_json(&resp), fallback_json());
    }
}

#[tokio::test]
async fn test_network_error_yields_fallback() {
    // Reserve a port, then free it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let tmp = project_root();
    let config = config_for(&tmp);
    let llm = LlmService::with_provider(
        config.llm.clone(),
        mock_provider(format!("http://127.0.0.1:{}/v1", port)),
    );

    let resp = post_prompt(AppState::with_llm(config, llm), "fall asleep standing").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(&resp), fallback_json());
}

// ── Errors That Do Reach The Caller ─────────────────────────

#[tokio::test]
async fn test_empty_prompt_is_400_and_never_calls_model() {
    let tmp = project_root();
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body("{}")))
        .expect(0)
        .mount(&mock)
        .await;

    for prompt in ["", "   ", "\n\t "] {
        let resp = post_prompt(state_with_mock(&tmp, &mock), prompt).await;
        assert_eq!(resp.status(), 400);
        assert_eq!(
            body_json(&resp),
            serde_json::json!({ "detail": "Missing or empty prompt" })
        );
    }
}

#[tokio::test]
async fn test_missing_credential_is_500() {
    let tmp = project_root();
    let mut config = config_for(&tmp);
    config.llm.api_key = None;
    config.llm.api_key_env = Some("PROMPT_ANIMATOR_TEST_NEVER_SET".into());

    let resp = post_prompt(AppState::from_config(config), "moonwalk to victory").await;
    assert_eq!(resp.status(), 500);
    let detail = body_json(&resp)["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Internal server error"), "{}", detail);
    assert!(detail.contains("PROMPT_ANIMATOR_TEST_NEVER_SET"), "{}", detail);
}

#[tokio::test]
async fn test_malformed_request_bodies_are_400() {
    let tmp = project_root();
    let filter = routes(state_with_reply(&tmp, "{}"));

    for body in ["not json", "{}", "{\"prompt\": 42}", "[\"prompt\"]"] {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/sequence")
            .header("content-type", "application/json")
            .body(body)
            .reply(&filter)
            .await;
        assert_eq!(resp.status(), 400, "body {:?}", body);
        assert!(body_json(&resp)["detail"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }
}

#[tokio::test]
async fn test_deleted_file_returns_404() {
    let tmp = project_root();
    let filter = routes(state_with_reply(&tmp, "{}"));

    let resp = warp::test::request().path("/public/player.js").reply(&filter).await;
    assert_eq!(resp.status(), 200);

    std::fs::remove_file(tmp.path().join("public/player.js")).unwrap();

    let resp = warp::test::request().path("/public/player.js").reply(&filter).await;
    assert_eq!(resp.status(), 404, "deleted file should return 404");
}

#[tokio::test]
async fn test_missing_root_dir_returns_404() {
    let tmp = project_root();
    std::fs::remove_dir_all(tmp.path().join("shared")).unwrap();
    let resp = warp::test::request()
        .path("/shared/common.css")
        .reply(&routes(state_with_reply(&tmp, "{}")))
        .await;
    assert_eq!(resp.status(), 404);
}
