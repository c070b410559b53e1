//! CLI configuration with layered resolution
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`PMPRO_*`)
//! 2. Config file (`--config`, else `$PMPRO_HOME/config.toml` when present)
//! 3. Compiled defaults
//!
//! The stored model preference sits between 1 and 2 for the model only; it
//! is applied by [`crate::app::Context`].

use anyhow::Context as _;
use pmpro_assist::AssistConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inference server URL override
pub const ENV_OLLAMA_URL: &str = "PMPRO_OLLAMA_URL";
/// Model override
pub const ENV_MODEL: &str = "PMPRO_MODEL";
/// Local inference toggle
pub const ENV_USE_OLLAMA: &str = "PMPRO_USE_OLLAMA";
/// Data directory
pub const ENV_HOME: &str = "PMPRO_HOME";

const CONFIG_FILE: &str = "config.toml";
const PREFERENCES_FILE: &str = "preferences.json";
const DEFAULT_HOME: &str = ".pmpro";

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmConfig {
    /// Text generation settings
    pub assist: AssistConfig,
    /// Data directory for preferences
    pub home: Option<PathBuf>,
    /// Explicit preference file, overrides `home`
    pub preferences_path: Option<PathBuf>,
    /// Model was pinned by the environment and must not be replaced by the
    /// stored preference
    #[serde(skip)]
    pub model_pinned: bool,
}

impl PmConfig {
    /// Parse from TOML text
    ///
    /// # Errors
    /// Invalid TOML or field types.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid TOML configuration")
    }

    /// Load using the process environment
    ///
    /// # Errors
    /// Unreadable or invalid config file.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Load with an explicit environment lookup
    ///
    /// # Errors
    /// Unreadable or invalid config file.
    pub fn load_with<F>(path: Option<&Path>, env: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => env(ENV_HOME)
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
                .filter(|candidate| candidate.exists()),
        };

        let mut config = match file {
            Some(file) => {
                let text = std::fs::read_to_string(&file)
                    .with_context(|| format!("failed to read config {}", file.display()))?;
                tracing::debug!("Loaded config from {}", file.display());
                Self::from_toml(&text).with_context(|| format!("in {}", file.display()))?
            }
            None => Self::default(),
        };

        config.apply_env(env);
        Ok(config)
    }

    /// Apply `PMPRO_*` overrides
    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env(ENV_OLLAMA_URL).filter(|v| !v.trim().is_empty()) {
            self.assist.base_url = url;
        }
        if let Some(model) = env(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            self.assist.model = model;
            self.model_pinned = true;
        }
        if let Some(raw) = env(ENV_USE_OLLAMA) {
            match parse_bool(&raw) {
                Some(enabled) => self.assist.use_ollama = enabled,
                None => tracing::warn!("Ignoring {}={}: expected a boolean", ENV_USE_OLLAMA, raw),
            }
        }
        if let Some(home) = env(ENV_HOME).filter(|v| !v.trim().is_empty()) {
            self.home = Some(PathBuf::from(home));
        }
    }

    /// Preference file location
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        if let Some(path) = &self.preferences_path {
            return path.clone();
        }
        self.home
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME))
            .join(PREFERENCES_FILE)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
