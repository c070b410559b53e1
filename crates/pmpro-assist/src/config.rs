//! Text generation configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default local inference endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "phi3";

/// Backend selection and connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Use the local inference server instead of the simulated backend
    pub use_ollama: bool,
    /// Inference server base URL
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// HTTP request timeout in milliseconds
    pub timeout_ms: u64,
    /// Artificial latency of the simulated backend in milliseconds
    pub simulated_latency_ms: u64,
}

impl AssistConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With local inference enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_ollama(mut self, enabled: bool) -> Self {
        self.use_ollama = enabled;
        self
    }

    /// With base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// With model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With simulated latency
    #[inline]
    #[must_use]
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Simulated backend latency
    #[inline]
    #[must_use]
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            use_ollama: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: 60_000,
            simulated_latency_ms: 2_000,
        }
    }
}
