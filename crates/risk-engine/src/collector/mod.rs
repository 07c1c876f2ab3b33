//! Signal Collector
//!
//! Abstractions over the social data provider, plus the raw record shapes it
//! returns. Converting a raw [`SocialAccount`] into [`AccountSignals`] is where
//! malformed provider data is rejected.

#[cfg(test)]
mod canned_http;
mod mock;
mod telegram;
mod twitter;

pub use mock::{MockCollector, MockFailure};
pub use telegram::{
    normalize_telegram_username, ChatDirectory, TelegramChat, TelegramClient, TelegramConfig,
};
pub use twitter::{TwitterClient, TwitterConfig};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskError};
use crate::model::{AccountSignals, ActivityItem};

/// Longest handle the provider accepts
pub const MAX_USERNAME_LEN: usize = 15;

/// Social data provider (Strategy pattern)
#[async_trait]
pub trait SignalCollector: Send + Sync {
    /// Fetch an account and its recent posts; `None` when the handle is unknown
    async fn lookup(&self, username: &str) -> Result<Option<SocialAccount>>;

    /// Provider name
    fn name(&self) -> &str;
}

/// Account counters as reported by the provider
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicMetrics {
    pub followers_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u64>,
    pub tweet_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listed_count: Option<u64>,
}

/// Per-post counters
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetMetrics {
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub public_metrics: Option<TweetMetrics>,
}

/// Raw account record with recent posts attached
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub public_metrics: Option<PublicMetrics>,
    #[serde(default, rename = "recentTweets")]
    pub recent_tweets: Vec<Tweet>,
}

impl TryFrom<&SocialAccount> for AccountSignals {
    type Error = RiskError;

    fn try_from(account: &SocialAccount) -> Result<Self> {
        let metrics = account
            .public_metrics
            .as_ref()
            .ok_or_else(|| {
                RiskError::validation(format!("account {} has no public_metrics", account.id))
            })?;

        let follower_count = metrics
            .followers_count
            .ok_or_else(|| RiskError::validation("public_metrics.followers_count is missing"))?;
        let tweet_count = metrics
            .tweet_count
            .ok_or_else(|| RiskError::validation("public_metrics.tweet_count is missing"))?;

        let created_raw = account
            .created_at
            .as_deref()
            .ok_or_else(|| RiskError::validation("created_at is missing"))?;
        let created_at = DateTime::parse_from_rfc3339(created_raw)
            .map_err(|e| {
                RiskError::validation(format!("created_at '{created_raw}' is not RFC 3339: {e}"))
            })?
            .with_timezone(&Utc);

        let recent_activity = account
            .recent_tweets
            .iter()
            .enumerate()
            .map(|(i, tweet)| {
                tweet
                    .public_metrics
                    .as_ref()
                    .map(|m| ActivityItem::new(m.retweet_count, m.like_count, m.reply_count))
                    .ok_or_else(|| {
                        RiskError::validation(format!("recent tweet #{i} has no public_metrics"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AccountSignals {
            created_at,
            follower_count,
            tweet_count,
            is_verified: account.verified.unwrap_or(false),
            recent_activity,
        })
    }
}

impl AccountSignals {
    /// Parse a provider JSON record straight into signals
    pub fn from_json(json: &str) -> Result<Self> {
        let account: SocialAccount = serde_json::from_str(json)
            .map_err(|e| RiskError::validation(format!("malformed account record: {e}")))?;
        Self::try_from(&account)
    }
}

/// Strip a leading `@` and check the handle's shape
pub fn normalize_username(raw: &str) -> Result<String> {
    let name = raw.trim().trim_start_matches('@');

    if name.is_empty() {
        return Err(RiskError::validation("username is empty"));
    }
    if name.len() > MAX_USERNAME_LEN {
        return Err(RiskError::validation(format!(
            "username exceeds {MAX_USERNAME_LEN} characters"
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(RiskError::validation(format!("username '{name}' has invalid characters")));
    }

    Ok(name.to_string())
}
