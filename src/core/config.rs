//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hasan/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::inference::GenerationConfig;
use crate::inference::providers::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HasanConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenerationSettings {
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    pub top_p: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub assistant_name: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ASSISTANT_NAME: &str = "Hasan";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Empty when no key was configured; requests then fail upstream.
    pub api_key: String,
    pub base_url: String,
    pub model_name: String,
    pub generation: GenerationConfig,
    pub assistant_name: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.hasan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hasan").join("config.toml"))
}

/// Load config from `~/.hasan/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HasanConfig::default()`.
pub fn load_config() -> Result<HasanConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HasanConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path. Missing file → generated default.
pub fn load_config_from(path: &Path) -> Result<HasanConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(HasanConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HasanConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Keep the key out of the log.
    debug!(
        "Config: base_url={:?}, model={:?}, generation={:?}, chat={:?}",
        config.gemini.base_url, config.gemini.model, config.generation, config.chat
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Hasan Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [gemini]
# api_key = "..."                    # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# model = "gemini-2.0-flash"         # Or GEMINI_MODEL / --model

# [generation]
# temperature = 0.7
# max_output_tokens = 500
# top_p = 0.8

# [chat]
# assistant_name = "Hasan"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_model` is from the `--model` flag (None = not specified).
pub fn resolve(config: &HasanConfig, cli_model: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_model, |name| std::env::var(name).ok())
}

/// Resolution with an injectable environment lookup.
fn resolve_with_env(
    config: &HasanConfig,
    cli_model: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // API key: env → config
    let api_key = env("GEMINI_API_KEY")
        .or_else(|| config.gemini.api_key.clone())
        .unwrap_or_else(|| {
            warn!("No Gemini API key configured (GEMINI_API_KEY or [gemini].api_key)");
            String::new()
        });

    // Base URL: env → config → default
    let base_url = env("GEMINI_BASE_URL")
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| env("GEMINI_MODEL"))
        .or_else(|| config.gemini.model.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

    let defaults = GenerationConfig::default();
    let generation = GenerationConfig {
        temperature: config.generation.temperature.unwrap_or(defaults.temperature),
        max_output_tokens: config
            .generation
            .max_output_tokens
            .unwrap_or(defaults.max_output_tokens),
        top_p: config.generation.top_p.unwrap_or(defaults.top_p),
    };

    ResolvedConfig {
        api_key,
        base_url,
        model_name,
        generation,
        assistant_name: config
            .chat
            .assistant_name
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
    }
}
