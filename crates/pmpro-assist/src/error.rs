//! Error types for text generation

/// Text generation error
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Inference server answered with a non-success status
    #[error("server error: HTTP {status} - {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Server answered successfully but produced no text
    #[error("empty response")]
    EmptyResponse,

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl AssistError {
    /// Check if error is worth retrying against the same backend
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Server { status, .. } => *status >= 500,
            Self::EmptyResponse | Self::Config(_) => false,
        }
    }
}
