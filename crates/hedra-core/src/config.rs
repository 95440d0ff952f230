use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::encoder::DEFAULT_CHUNK_SIZE;
use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 2000,
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            backoff_factor: self.backoff_factor.max(1.0),
        }
    }
}

/// Global configuration loaded from `~/.config/hedra/config.toml`.
///
/// The API key is deliberately not part of the file; it comes from the
/// `HEDRA_API_KEY` environment variable (see [`api_key`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedraConfig {
    /// Base URL of the generative-language service.
    pub api_base_url: String,
    /// Model name used for all artifact generation.
    pub model: String,
    /// Hard timeout for one upstream request, in seconds.
    pub request_timeout_secs: u64,
    /// Optional override of the 1 MiB read chunk size.
    #[serde(default)]
    pub chunk_size_bytes: Option<usize>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for HedraConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            request_timeout_secs: 300,
            chunk_size_bytes: None,
            retry: None,
        }
    }
}

impl HedraConfig {
    /// Effective retry policy for upstream calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryConfig::to_policy)
            .unwrap_or_default()
    }

    /// Effective encoder chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size_bytes.unwrap_or(DEFAULT_CHUNK_SIZE).max(1)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hedra")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HedraConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HedraConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HedraConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// API key for the upstream service, from the environment only.
pub fn api_key() -> Result<String> {
    std::env::var("HEDRA_API_KEY")
        .context("HEDRA_API_KEY is not set; export it before running hedra")
}
