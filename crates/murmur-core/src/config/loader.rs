//! Config loader — reads `~/.murmur/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.murmur/config.json`
//! 3. Environment variables `MURMUR_CHAT__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `MURMUR_CHAT__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `MURMUR_CHAT__MODEL` → `chat.model`
/// - `MURMUR_CHAT__HOST` → `chat.host`
/// - `MURMUR_CHAT__STREAM` → `chat.stream`
/// - `MURMUR_CHAT__SYSTEM_PROMPT` → `chat.system_prompt`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("MURMUR_CHAT__MODEL") {
        config.chat.model = val;
    }
    if let Ok(val) = std::env::var("MURMUR_CHAT__HOST") {
        config.chat.host = val;
    }
    if let Ok(val) = std::env::var("MURMUR_CHAT__STREAM") {
        config.chat.stream = val == "true" || val == "1";
    }
    if let Ok(val) = std::env::var("MURMUR_CHAT__SYSTEM_PROMPT") {
        config.chat.system_prompt = Some(val);
    }
    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
