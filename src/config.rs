//! Service settings: an optional JSON file, then environment overrides.
//! Also hosts the shared helpers for loading JSON config files and
//! resolving API keys from fields or environment variables.

use crate::error::ConfigError;
use crate::llm::llm_config::LlmConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Env var naming the settings file.
pub const CONFIG_PATH_ENV: &str = "ANIMATOR_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "animator_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_title: String,
    pub api_description: String,
    pub api_version: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    /// "*" or a comma-separated list of origins.
    pub cors_origins: String,
    /// Project root holding `public/`, `shared/` and `assets/`.
    pub root_dir: PathBuf,
    pub llm: LlmConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_title: "Animation API".to_string(),
            api_description: "API for animation services".to_string(),
            api_version: env!("CARGO_PKG_VERSION").to_string(),
            host: "0.0.0.0".to_string(),
            port: 3333,
            debug: false,
            cors_origins: "*".to_string(),
            root_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            llm: LlmConfig::default(),
        }
    }
}

impl AppConfig {
    /// Settings file (if any) from `ANIMATOR_CONFIG`, then the process environment.
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config: AppConfig = load_json_config(&path, "Config");
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overlay environment values. `lookup` is injectable for tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            match parse_host(&host) {
                Some(_) => self.host = host.trim().to_string(),
                None => tracing::warn!(
                    "[Config] Ignoring invalid HOST={:?}, keeping {}",
                    host,
                    self.host
                ),
            }
        }
        if let Some(port) = get("PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.port = p,
                Err(_) => tracing::warn!(
                    "[Config] Ignoring invalid PORT={:?}, keeping {}",
                    port,
                    self.port
                ),
            }
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            self.cors_origins = origins;
        }
        if let Some(root) = get("ANIMATOR_ROOT") {
            self.root_dir = PathBuf::from(root);
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = get("OPENAI_BASE_URL") {
            self.llm.base_url = Some(url);
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.llm.model = Some(model);
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = parse_host(&self.host)
            .ok_or_else(|| ConfigError::BindAddress(format!("{}:{}", self.host, self.port)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Parsed CORS origins. `None` means any origin.
    pub fn cors_origin_list(&self) -> Option<Vec<String>> {
        let raw = self.cors_origins.trim();
        if raw.is_empty() || raw == "*" {
            return None;
        }
        let origins: Vec<String> = raw
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if origins.iter().any(|o| o == "*") || origins.is_empty() {
            None
        } else {
            Some(origins)
        }
    }
}

/// IP literal, or `localhost` as the IPv4 loopback.
fn parse_host(host: &str) -> Option<IpAddr> {
    let host = host.trim();
    if host.eq_ignore_ascii_case("localhost") {
        return Some(IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
    host.parse().ok()
}

/// Read and parse a JSON config file. `Ok(None)` when the file does not exist.
pub fn try_load_json_config<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };
    serde_json::from_str::<T>(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
}

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match try_load_json_config::<T>(path) {
        Ok(Some(config)) => {
            tracing::info!("[{}] Loaded config from {}", label, path.display());
            config
        }
        Ok(None) => {
            tracing::info!(
                "[{}] No config file at {}, using defaults",
                label,
                path.display()
            );
            T::default()
        }
        Err(e) => {
            tracing::warn!("[{}] {}; using defaults", label, e);
            T::default()
        }
    }
}

/// Resolve an API key: check the direct `api_key` field first,
/// then fall back to reading the environment variable named in `api_key_env`.
pub fn resolve_api_key(api_key: &Option<String>, api_key_env: &Option<String>) -> Option<String> {
    if let Some(ref key) = api_key {
        if !key.trim().is_empty() {
            return Some(key.clone());
        }
    }
    if let Some(ref env_var) = api_key_env {
        if let Ok(key) = std::env::var(env_var) {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }
    }
    None
}
