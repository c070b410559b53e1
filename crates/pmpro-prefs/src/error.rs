//! Error types for preference handling

use std::path::PathBuf;

/// Preference error
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// Reading or writing the preference file failed
    #[error("preference file {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Preference file is not a JSON object of strings
    #[error("malformed preference file {path}: {source}")]
    Malformed {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Empty model identifier
    #[error("model identifier must not be empty")]
    EmptyModel,
}
