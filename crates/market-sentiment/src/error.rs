//! Error Types

use thiserror::Error;

/// Result type alias for sentiment operations
pub type Result<T> = std::result::Result<T, SentimentError>;

#[derive(Error, Debug)]
pub enum SentimentError {
    /// Blank or otherwise unusable request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered without any choices
    #[error("Provider returned no choices")]
    EmptyResponse,

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Rate limited by provider")]
    RateLimited,

    /// Non-success HTTP status from the provider
    #[error("Provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SentimentError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            SentimentError::ProviderUnavailable(_)
            | SentimentError::RateLimited
            | SentimentError::Network(_) => true,
            SentimentError::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            SentimentError::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            SentimentError::EmptyResponse => {
                "The stockbot had nothing to say. Please rephrase.".into()
            }
            SentimentError::RateLimited => {
                "Too many stockbot requests. Please wait a moment.".into()
            }
            SentimentError::Config(_) => "The stockbot is not configured.".into(),
            _ => "Failed to fetch stock data".into(),
        }
    }
}
