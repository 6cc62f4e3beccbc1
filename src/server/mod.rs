//! HTTP surface (warp): sequence generation, static roots, health.

pub mod handlers;

use crate::ai::SequenceGenerator;
use crate::assets::{StaticRoot, StaticRoots};
use crate::config::AppConfig;
use crate::llm::LlmService;
use handlers::detail_reply;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::header::HeaderValue;
use warp::http::uri::{self, Uri};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Largest accepted `/api/sequence` body.
pub(crate) const MAX_BODY_SIZE: u64 = 64 * 1024;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub generator: SequenceGenerator,
    pub roots: StaticRoots,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let llm = LlmService::from_config(config.llm.clone());
        Self::with_llm(config, llm)
    }

    /// State around an existing `LlmService` (custom providers, tests).
    pub fn with_llm(config: AppConfig, llm: LlmService) -> Self {
        Self {
            generator: SequenceGenerator::new(llm),
            roots: StaticRoots::from_project_root(&config.root_dir),
            config: Arc::new(config),
        }
    }
}

fn with_state(
    state: AppState,
) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn static_root() -> impl Filter<Extract = (StaticRoot,), Error = Rejection> + Clone {
    warp::path("public")
        .map(|| StaticRoot::Public)
        .or(warp::path("shared").map(|| StaticRoot::Shared))
        .unify()
        .or(warp::path("assets").map(|| StaticRoot::Assets))
        .unify()
}

fn cors(config: &AppConfig) -> warp::cors::Cors {
    let builder = warp::cors()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization", "accept"]);

    match config.cors_origin_list() {
        None => builder.allow_any_origin().build(),
        Some(origins) => {
            let valid: Vec<String> = origins
                .into_iter()
                .filter(|o| {
                    let ok = is_valid_origin(o);
                    if !ok {
                        tracing::warn!("[Server] Ignoring malformed CORS origin {:?}", o);
                    }
                    ok
                })
                .collect();
            builder
                .allow_origins(valid.iter().map(String::as_str))
                .build()
        }
    }
}

/// `scheme://host[:port]`, parsed the way warp parses allowed origins, so
/// anything accepted here cannot make `Cors` construction panic.
fn is_valid_origin(origin: &str) -> bool {
    if !origin.contains("://") || HeaderValue::from_str(origin).is_err() {
        return false;
    }
    match origin.parse::<Uri>().map(Uri::into_parts) {
        Ok(uri::Parts {
            scheme: Some(_),
            authority: Some(_),
            path_and_query,
            ..
        }) => path_and_query.map_or(true, |p| p == "/"),
        _ => false,
    }
}

/// All routes, with CORS, request tracing and JSON error bodies. Error
/// bodies pass through CORS so browsers can read them.
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let sequence = warp::path!("api" / "sequence")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_SIZE))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::create_sequence);

    let health = warp::path!("health")
        .or(warp::path!("api" / "health"))
        .unify()
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(handlers::health);

    let static_files = static_root()
        .and(warp::path::tail())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::serve_static);

    let index = warp::path::end()
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::serve_index);

    sequence
        .or(health)
        .unify()
        .or(static_files)
        .unify()
        .or(index)
        .unify()
        .recover(handle_rejection)
        .with(cors(&state.config))
        .with(warp::trace::request())
        // CORS itself rejects disallowed origins.
        .recover(handle_rejection)
}

async fn handle_rejection(err: Rejection) -> Result<warp::reply::Response, Infallible> {
    let (status, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected application/json".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else if let Some(e) = err.find::<warp::cors::CorsForbidden>() {
        (StatusCode::FORBIDDEN, e.to_string())
    } else {
        tracing::error!("[Server] Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };
    Ok(detail_reply(status, detail))
}

/// Bind `addr` and return the bound address plus the server future,
/// which completes once `shutdown` resolves.
pub fn bind(
    state: AppState,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>), warp::Error> {
    state.roots.log_layout();
    warp::serve(routes(state)).try_bind_with_graceful_shutdown(addr, shutdown)
}

/// Start serving on an ephemeral localhost port in the background.
pub fn spawn_ephemeral(state: AppState) -> Result<SocketAddr, warp::Error> {
    let (addr, fut) = warp::serve(routes(state)).try_bind_ephemeral(([127, 0, 0, 1], 0))?;
    tokio::spawn(fut);
    Ok(addr)
}

#[cfg(test)]
mod tests;
