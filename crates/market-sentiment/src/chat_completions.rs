//! OpenAI-compatible chat completions provider
//!
//! Works against any server exposing `POST /chat/completions`, such as a
//! LlamaEdge node.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::message::Message;
use crate::provider::{Completion, GenerationOptions, LlmProvider, TokenUsage};

/// Provider configuration
#[derive(Clone, Debug)]
pub struct ChatCompletionsConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,

    /// Bearer token; some local servers accept none
    pub api_key: Option<String>,

    /// Model sent with every request
    pub model: String,

    pub timeout_secs: u64,
}

impl ChatCompletionsConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            model: model.into(),
            timeout_secs: 60,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Read `LLAMAEDGE_BASE_URL`, `LLAMAEDGE_MODEL_NAME` and optionally `LLAMAEDGE_API_KEY`
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("LLAMAEDGE_BASE_URL")
            .map_err(|_| SentimentError::Config("LLAMAEDGE_BASE_URL is not set".into()))?;
        let model = std::env::var("LLAMAEDGE_MODEL_NAME")
            .map_err(|_| SentimentError::Config("LLAMAEDGE_MODEL_NAME is not set".into()))?;

        let config = Self::new(base_url, model);
        Ok(match std::env::var("LLAMAEDGE_API_KEY") {
            Ok(key) if !key.trim().is_empty() => config.with_api_key(key),
            _ => config,
        })
    }

    pub fn default_options(&self) -> GenerationOptions {
        GenerationOptions::new(self.model.clone())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// Take `choices[0].message.content` out of a raw response body
fn extract_completion(body: &str, requested_model: &str) -> Result<Completion> {
    let response: ChatResponse = serde_json::from_str(body)?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(SentimentError::EmptyResponse)?;

    Ok(Completion {
        content: choice.message.content.unwrap_or_default(),
        model: response.model.unwrap_or_else(|| requested_model.to_string()),
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
        finish_reason: choice.finish_reason,
    })
}

pub struct ChatCompletionsProvider {
    http: reqwest::Client,
    config: ChatCompletionsConfig,
}

impl ChatCompletionsProvider {
    pub fn new(config: ChatCompletionsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ChatCompletionsConfig::from_env()?)
    }

    pub fn config(&self) -> &ChatCompletionsConfig {
        &self.config
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.config.base_url);
        match self.authorized(self.http.get(&url)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("chat completions health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let model = if options.model.is_empty() {
            self.config.model.as_str()
        } else {
            options.model.as_str()
        };

        let request = ChatRequest {
            model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        tracing::debug!(%url, model, messages = messages.len(), "requesting chat completion");

        let response = self
            .authorized(self.http.post(&url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SentimentError::RateLimited);
        }
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(SentimentError::ProviderUnavailable(url));
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(SentimentError::Upstream {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        extract_completion(&body, model)
    }
}
