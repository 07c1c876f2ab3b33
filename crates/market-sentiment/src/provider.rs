//! LLM Provider Strategy Pattern
//!
//! Common interface for chat-completion backends so the stockbot works with
//! any OpenAI-compatible server, or a mock in tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use market_sentiment::{ChatCompletionsProvider, LlmProvider, GenerationOptions, Message};
//!
//! let provider = ChatCompletionsProvider::from_env()?;
//! let completion = provider
//!     .complete(&[Message::user("Is NVDA overheated?")], &GenerationOptions::new("llama"))
//!     .await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Per-request generation settings
///
/// Unset sampling fields are left out of the request so the server default
/// applies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Strategy trait for chat-completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Check if the provider is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_options_are_omitted() {
        let json = serde_json::to_value(GenerationOptions::new("llama")).unwrap();
        assert_eq!(json, serde_json::json!({"model": "llama"}));

        let options = GenerationOptions::new("llama").with_max_tokens(256);
        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json["max_tokens"], 256);
    }
}
