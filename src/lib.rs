pub mod ai;
pub mod animation;
pub mod assets;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod server;

use crate::config::AppConfig;
use crate::server::AppState;
use anyhow::Context;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "prompt_animator=info,warp=warn";
const DEBUG_LOG_FILTER: &str = "prompt_animator=debug,warp=info";

/// Install the global fmt subscriber. `RUST_LOG` wins over `debug`.
pub fn init_tracing(debug: bool) {
    let fallback = if debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed (embedding, tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Load settings, bind the HTTP server and serve until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load();
    init_tracing(config.debug);

    tracing::info!(
        "[Config] {} v{} (root={:?}, model={})",
        config.api_title,
        config.api_version,
        config.root_dir,
        config.llm.model()
    );
    if config.llm.resolve_api_key().is_none() {
        tracing::warn!(
            "[Config] {} is not set; /api/sequence will fail until it is",
            config.llm.credential_env_var()
        );
    }

    let addr = config.bind_addr().context("invalid listen address")?;
    let state = AppState::from_config(config);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("[Server] Failed to listen for shutdown signal: {}", e);
        }
        tracing::info!("[Server] Shutting down");
    };

    let (bound, server) = server::bind(state, addr, shutdown)
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("[Server] Listening on http://{}", bound);
    server.await;
    Ok(())
}
