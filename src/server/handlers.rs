use super::AppState;
use crate::assets::{ResolvedPath, StaticRoot};
use crate::error::SequenceError;
use crate::models::sequence::SequenceRequest;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::convert::Infallible;
use tracing::Instrument;
use uuid::Uuid;
use warp::http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::path::Tail;
use warp::reply::Response;
use warp::Reply;

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
    pub version: String,
    pub public_exists: bool,
}

pub(crate) fn detail_reply(status: StatusCode, detail: impl Into<String>) -> Response {
    warp::reply::with_status(
        warp::reply::json(&ErrorDetail {
            detail: detail.into(),
        }),
        status,
    )
    .into_response()
}

fn not_found() -> Response {
    detail_reply(StatusCode::NOT_FOUND, "File not found")
}

fn sequence_error_reply(err: &SequenceError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match err {
        SequenceError::EmptyPrompt => detail_reply(status, err.to_string()),
        _ => detail_reply(status, format!("Internal server error: {}", err)),
    }
}

/// `POST /api/sequence`
pub async fn create_sequence(
    request: SequenceRequest,
    state: AppState,
) -> Result<Response, Infallible> {
    let span = tracing::info_span!("sequence", request_id = %Uuid::new_v4());
    Ok(sequence_reply(request, state).instrument(span).await)
}

async fn sequence_reply(request: SequenceRequest, state: AppState) -> Response {
    let Some(prompt) = request.normalized_prompt() else {
        tracing::info!("[Sequence] Rejected empty prompt");
        return sequence_error_reply(&SequenceError::EmptyPrompt);
    };

    tracing::info!("[Sequence] Processing prompt: {}", prompt);
    match state.generator.generate(prompt).await {
        Ok(outcome) => warp::reply::json(&outcome.into_result()).into_response(),
        Err(e) => {
            tracing::error!("[Sequence] Error processing prompt: {}", e);
            sequence_error_reply(&e)
        }
    }
}

/// `GET /health`, `GET /api/health`
pub fn health(state: AppState) -> Response {
    warp::reply::json(&HealthStatus {
        status: "healthy",
        service: state.config.api_title.clone(),
        version: state.config.api_version.clone(),
        public_exists: state.roots.dir(StaticRoot::Public).is_dir(),
    })
    .into_response()
}

/// `GET /{public,shared,assets}/{path}`
pub async fn serve_static(
    root: StaticRoot,
    tail: Tail,
    state: AppState,
) -> Result<Response, Infallible> {
    let relative = match percent_decode_str(tail.as_str()).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => return Ok(not_found()),
    };
    Ok(resolve_and_read(state, root, relative).await)
}

/// `GET /` serves `public/index.html`.
pub async fn serve_index(state: AppState) -> Result<Response, Infallible> {
    Ok(resolve_and_read(state, StaticRoot::Public, "index.html".to_string()).await)
}

async fn resolve_and_read(state: AppState, root: StaticRoot, relative: String) -> Response {
    let roots = state.roots.clone();
    let resolved = tokio::task::spawn_blocking(move || roots.resolve(root, &relative))
        .await
        .unwrap_or(ResolvedPath::Rejected);

    let (path, content_type) = match resolved {
        ResolvedPath::File { path, content_type } => (path, content_type),
        ResolvedPath::Rejected => return not_found(),
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mut response = Response::new(bytes.into());
            let headers = response.headers_mut();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            response
        }
        Err(e) => {
            tracing::warn!("[Static] Read error for {:?}: {}", path, e);
            not_found()
        }
    }
}
