//! Text generation strategies
//!
//! The backend is chosen once at construction time from [`AssistConfig`]:
//! a real local inference client, or a simulated stub that returns a canned
//! marker after an artificial delay. Generators built on top of the trait
//! (PRD, user stories, competitive analysis) recognise the marker and fall
//! back to templated output.

use crate::config::AssistConfig;
use crate::error::AssistError;
use crate::ollama::OllamaGenerator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Text returned by the simulated backend
pub const SIMULATED_RESPONSE: &str = "This is a simulated response. Enable local inference by \
     setting use_ollama = true and installing Ollama with the phi3 model.";

/// Substring used to recognise simulated output
pub const SIMULATED_MARKER: &str = "simulated response";

/// Sampling options forwarded to the backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling threshold
    pub top_p: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl GenerationOptions {
    /// With temperature
    #[inline]
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// With max tokens
    #[inline]
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 2000,
        }
    }
}

/// A text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AssistError>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Check whether a response came from the simulated backend
#[inline]
#[must_use]
pub fn is_simulated(response: &str) -> bool {
    response.contains(SIMULATED_MARKER)
}

/// Canned backend with artificial latency
#[derive(Debug, Clone, Default)]
pub struct SimulatedGenerator {
    latency: Duration,
}

impl SimulatedGenerator {
    /// Create simulated backend
    #[inline]
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl TextGenerator for SimulatedGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, AssistError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(SIMULATED_RESPONSE.to_string())
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Tries a primary backend and falls back on any error
pub struct FallbackGenerator {
    primary: Arc<dyn TextGenerator>,
    fallback: Arc<dyn TextGenerator>,
}

impl FallbackGenerator {
    /// Create fallback chain
    #[inline]
    #[must_use]
    pub fn new(primary: Arc<dyn TextGenerator>, fallback: Arc<dyn TextGenerator>) -> Self {
        Self { primary, fallback }
    }
}

impl std::fmt::Debug for FallbackGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackGenerator")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

#[async_trait]
impl TextGenerator for FallbackGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AssistError> {
        match self.primary.generate(prompt, options).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(
                    "{} generation failed, falling back to {}: {}",
                    self.primary.name(),
                    self.fallback.name(),
                    e
                );
                self.fallback.generate(prompt, options).await
            }
        }
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}

/// Build the backend selected by configuration
///
/// # Errors
/// - `AssistError::Http` if the HTTP client cannot be constructed
pub fn build_generator(config: &AssistConfig) -> Result<Arc<dyn TextGenerator>, AssistError> {
    let simulated: Arc<dyn TextGenerator> =
        Arc::new(SimulatedGenerator::new(config.simulated_latency()));

    if !config.use_ollama {
        tracing::debug!("Using simulated text generation");
        return Ok(simulated);
    }

    tracing::debug!(
        "Using local inference at {} with model {}",
        config.base_url,
        config.model
    );
    let ollama: Arc<dyn TextGenerator> = Arc::new(OllamaGenerator::new(config)?);
    Ok(Arc::new(FallbackGenerator::new(ollama, simulated)))
}
