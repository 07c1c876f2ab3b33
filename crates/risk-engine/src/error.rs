//! Error Types for the Risk Engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RiskError>;

#[derive(Error, Debug)]
pub enum RiskError {
    /// Structurally invalid input: missing metrics, bad timestamps, bad handles
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single factor check could not produce a weight
    #[error("Check '{check}' unavailable: {reason}")]
    UpstreamUnavailable { check: String, reason: String },

    #[error("Check '{check}' timed out")]
    Timeout { check: String },

    #[error("Rate limited by social data provider")]
    RateLimited,

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RiskError {
    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        RiskError::Validation(msg.into())
    }

    /// Failures of the transport or the remote service, as opposed to bad input
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RiskError::Network(_)
                | RiskError::Upstream { .. }
                | RiskError::UpstreamUnavailable { .. }
                | RiskError::Timeout { .. }
        )
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, RiskError::RateLimited | RiskError::Timeout { .. } | RiskError::Network(_))
    }

    /// Convert to a user-facing message
    pub fn user_message(&self) -> String {
        match self {
            RiskError::Validation(msg) => format!("Invalid input: {msg}"),
            RiskError::RateLimited => {
                "Too many requests to the social provider. Please wait a moment.".into()
            }
            RiskError::Config(_) => "Service configuration error.".into(),
            e if e.is_transport() => "The social data provider is currently unavailable.".into(),
            _ => "Analysis failed.".into(),
        }
    }
}
