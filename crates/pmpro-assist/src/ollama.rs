//! Local inference client for an Ollama-compatible server
//!
//! Non-streaming `POST /api/generate`; availability check via `GET /api/tags`.

use crate::config::AssistConfig;
use crate::error::AssistError;
use crate::generator::{GenerationOptions, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Generate request body
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationOptions,
}

/// Generate response body (non-streaming)
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// HTTP client for local model inference
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    /// Create a client from configuration
    ///
    /// # Errors
    /// - `AssistError::Http` if the HTTP client cannot be built
    /// - `AssistError::Config` if the base URL or model is empty
    pub fn new(config: &AssistConfig) -> Result<Self, AssistError> {
        if config.base_url.trim().is_empty() {
            return Err(AssistError::Config("base_url must not be empty".to_string()));
        }
        if config.model.trim().is_empty() {
            return Err(AssistError::Config("model must not be empty".to_string()));
        }

        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Model sent with requests
    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check whether the server is reachable
    ///
    /// Any transport error or non-success status counts as unavailable.
    pub async fn check_status(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Inference server unreachable at {}: {}", url, e);
                false
            }
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AssistError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options,
        };

        tracing::debug!("Requesting generation from {} ({})", url, self.model);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        if body.response.is_empty() {
            return Err(AssistError::EmptyResponse);
        }
        Ok(body.response)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
