//! # market-sentiment
//!
//! The portfolAI "stockbot": free-form market questions forwarded to an
//! OpenAI-compatible chat-completions endpoint.
//!
//! ## Providers
//!
//! - **Chat completions**: any `POST /chat/completions` server (LlamaEdge,
//!   vLLM, OpenAI)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use market_sentiment::{ChatCompletionsProvider, MarketSentiment};
//!
//! let provider = ChatCompletionsProvider::from_env()?;
//! let options = provider.config().default_options();
//! let bot = MarketSentiment::new(Arc::new(provider), options);
//! let answer = bot.ask("What's the mood on semiconductors?").await?;
//! ```

pub mod chat_completions;
pub mod error;
pub mod message;
pub mod provider;
pub mod sentiment;

pub use chat_completions::{ChatCompletionsConfig, ChatCompletionsProvider};
pub use error::{Result, SentimentError};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider, TokenUsage};
pub use sentiment::MarketSentiment;
