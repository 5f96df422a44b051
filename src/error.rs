//! Error taxonomy for the digest pipeline.
//!
//! Every stage returns [`PipelineError`]. Only [`PipelineError::Parse`] is
//! treated specially by the binary (a clean early exit); all other variants
//! end the run with their message.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing credentials, unreadable settings file, malformed endpoint.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure while talking to the news API.
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The news API response body is not valid JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The response is JSON but an article record lacks an expected field.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The news API answered with its own error envelope.
    #[error("News API error ({code}): {message}")]
    NewsApi { code: String, message: String },

    /// A chat completion call failed.
    #[error("Model error: {0}")]
    Model(String),
}

impl PipelineError {
    /// `true` for the one failure the binary reports without an error exit.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, PipelineError::Parse(_))
    }
}
