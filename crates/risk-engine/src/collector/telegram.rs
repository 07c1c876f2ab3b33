//! Telegram Bot API collector
//!
//! A public username resolves through `getChat`. The bot token travels in the
//! URL path, so request URLs are never logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskError};

/// Telegram accepts 5..=32 characters of `[A-Za-z0-9_]`
const MIN_USERNAME_LEN: usize = 5;
const MAX_USERNAME_LEN: usize = 32;

/// Public chat, channel or user as returned by `getChat`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TelegramChat {
    pub id: i64,

    /// `private`, `group`, `supergroup` or `channel`
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Resolves public Telegram handles (Strategy pattern)
#[async_trait]
pub trait ChatDirectory: Send + Sync {
    /// `None` when no public chat carries the handle
    async fn get_chat(&self, username: &str) -> Result<Option<TelegramChat>>;

    fn name(&self) -> &str;
}

/// Strip a leading `@` and check the handle against Telegram's rules
pub fn normalize_telegram_username(raw: &str) -> Result<String> {
    let handle = raw.trim().trim_start_matches('@');

    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&handle.len()) {
        return Err(RiskError::validation(format!(
            "Telegram username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters"
        )));
    }
    if !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(RiskError::validation(
            "Telegram username may only contain letters, digits and underscores",
        ));
    }

    Ok(handle.to_string())
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    /// Bot API base URL, without a trailing slash
    pub base_url: String,

    pub bot_token: String,

    pub timeout_secs: u64,
}

impl TelegramConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.telegram.org";

    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.into(),
            bot_token: bot_token.into(),
            timeout_secs: 10,
        }
    }

    /// Read `TELEGRAM_BOT_TOKEN` and optionally `TELEGRAM_API_BASE`
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| RiskError::Config("TELEGRAM_BOT_TOKEN is not set".into()))?;
        let base_url = std::env::var("TELEGRAM_API_BASE")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.into());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(bot_token)
        })
    }
}

/// `{ "ok": ..., "result": ..., "description": ... }` envelope of every Bot API call
#[derive(Debug, Deserialize)]
struct BotReply<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramClient {
    http: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(TelegramConfig::from_env()?)
    }
}

#[async_trait]
impl ChatDirectory for TelegramClient {
    async fn get_chat(&self, username: &str) -> Result<Option<TelegramChat>> {
        let username = normalize_telegram_username(username)?;
        let url = format!("{}/bot{}/getChat", self.config.base_url, self.config.bot_token);
        tracing::debug!(%username, "requesting getChat");

        let response = self
            .http
            .get(&url)
            .query(&[("chat_id", format!("@{username}"))])
            .send()
            .await
            // reqwest errors embed the URL, which carries the token
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RiskError::RateLimited);
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        let reply: Option<BotReply<TelegramChat>> = serde_json::from_str(&body).ok();
        let description = reply.as_ref().and_then(|r| r.description.clone());

        if status == StatusCode::BAD_REQUEST
            && description
                .as_deref()
                .is_some_and(|d| d.to_ascii_lowercase().contains("not found"))
        {
            tracing::info!(%username, "chat not found");
            return Ok(None);
        }

        match reply {
            Some(BotReply {
                ok: true,
                result: Some(chat),
                ..
            }) if status.is_success() => Ok(Some(chat)),
            _ => Err(RiskError::Upstream {
                status: status.as_u16(),
                message: description.unwrap_or_else(|| status.to_string()),
            }),
        }
    }

    fn name(&self) -> &str {
        "Telegram"
    }
}
