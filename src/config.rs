//! Service configuration module.
//!
//! Handles loading and validating the `mandelserve.toml` file. All
//! settings have stock defaults; the file is optional and sparse, so a
//! user config only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! bind = "0.0.0.0:8080"  # Listen address for the HTTP server
//! request_threads = 4    # Request worker threads (each blocks per render)
//!
//! [processing]
//! max_threads = 4        # Max rayon render threads (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Service configuration loaded from `mandelserve.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl ServiceConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.is_empty() {
            return Err(ConfigError::Validation(
                "server.bind must not be empty".into(),
            ));
        }
        if self.server.request_threads == 0 {
            return Err(ConfigError::Validation(
                "server.request_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address and port the server listens on.
    pub bind: String,
    /// Number of threads pulling requests off the listener. Each thread
    /// serves one request at a time, render included, so this is also
    /// the number of renders that can be in flight at once.
    pub request_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_threads: default_request_threads(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_threads() -> usize {
    4
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of rayon threads for the per-pixel render pass.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective render thread count from config.
///
/// - `None` -> use all available cores
/// - `Some(n)` -> use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load config from the given TOML file.
///
/// A missing file is not an error: the stock defaults apply. A file
/// that exists but fails to parse or validate is.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    if !path.exists() {
        return Ok(ServiceConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `mandelserve.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Mandelserve Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# HTTP server
# ---------------------------------------------------------------------------
[server]
# Address and port to listen on.
bind = "0.0.0.0:8080"

# Request worker threads. Each worker serves one request at a time and
# blocks for the full render, so this caps concurrent renders.
request_threads = 4

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[processing]
# Maximum rayon threads for the per-pixel render pass.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4
"##
}
