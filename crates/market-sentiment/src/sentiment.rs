//! Stockbot
//!
//! Forwards a single user question to the configured provider and returns the
//! text of the first choice. An optional system prompt goes in front of it.

use std::sync::Arc;

use crate::error::{Result, SentimentError};
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};

pub struct MarketSentiment {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
    system_prompt: Option<String>,
}

impl MarketSentiment {
    pub fn new(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self {
            provider,
            options,
            system_prompt: None,
        }
    }

    /// Sent as a `system` message ahead of every question
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    pub async fn ask(&self, message: &str) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(SentimentError::InvalidRequest("message must not be empty".into()));
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message::system(prompt.as_str()));
        }
        messages.push(Message::user(message));

        let completion = self
            .provider
            .complete(&messages, &self.options)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    provider = self.provider.name(),
                    error = %e,
                    "stockbot request failed"
                );
            })?;

        tracing::info!(
            provider = self.provider.name(),
            model = %completion.model,
            chars = completion.content.len(),
            "stockbot answered"
        );

        Ok(completion.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Completion;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the last user message, recording what it saw
    #[derive(Default)]
    struct EchoProvider {
        seen: Mutex<Vec<Vec<Message>>>,
        fail: bool,
    }

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(!self.fail)
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> Result<Completion> {
            if self.fail {
                return Err(SentimentError::EmptyResponse);
            }
            self.seen.lock().unwrap().push(messages.to_vec());
            Ok(Completion {
                content: format!("echo: {}", messages[messages.len() - 1].content),
                model: options.model.clone(),
                usage: None,
                finish_reason: Some("stop".into()),
            })
        }
    }

    #[tokio::test]
    async fn test_ask_forwards_single_user_message() {
        let provider = Arc::new(EchoProvider::default());
        let bot = MarketSentiment::new(provider.clone(), GenerationOptions::new("llama"));

        let answer = bot.ask("  Is TSLA a buy?  ").await.unwrap();
        assert_eq!(answer, "echo: Is TSLA a buy?");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![Message::user("Is TSLA a buy?")]);
    }

    #[tokio::test]
    async fn test_system_prompt_goes_first() {
        let provider = Arc::new(EchoProvider::default());
        let bot = MarketSentiment::new(provider.clone(), GenerationOptions::new("llama"))
            .with_system_prompt("You are a cautious market analyst.");

        let answer = bot.ask("Is TSLA a buy?").await.unwrap();
        assert_eq!(answer, "echo: Is TSLA a buy?");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            vec![
                Message::system("You are a cautious market analyst."),
                Message::user("Is TSLA a buy?"),
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let provider = Arc::new(EchoProvider::default());
        let bot = MarketSentiment::new(provider, GenerationOptions::new("llama"));
        let err = bot.ask("   ").await.unwrap_err();
        assert!(matches!(err, SentimentError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(EchoProvider {
            fail: true,
            ..EchoProvider::default()
        });
        let bot = MarketSentiment::new(provider, GenerationOptions::new("llama"));
        assert!(matches!(bot.ask("hello").await, Err(SentimentError::EmptyResponse)));
        assert!(!bot.provider().health_check().await.unwrap());
    }
}
