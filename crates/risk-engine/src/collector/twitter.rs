//! Twitter/X API v2 collector

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{normalize_username, SignalCollector, SocialAccount, Tweet};
use crate::error::{Result, RiskError};

const USER_FIELDS: &str = "public_metrics,created_at,description,verified";
const TWEET_FIELDS: &str = "public_metrics,created_at";
const RECENT_TWEETS: &str = "10";

/// Twitter client configuration
#[derive(Clone, Debug)]
pub struct TwitterConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,

    pub bearer_token: String,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl TwitterConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.twitter.com/2";

    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.into(),
            bearer_token: bearer_token.into(),
            timeout_secs: 10,
        }
    }

    /// Read `TWITTER_BEARER_TOKEN` and optionally `TWITTER_API_BASE`
    pub fn from_env() -> Result<Self> {
        let bearer_token = std::env::var("TWITTER_BEARER_TOKEN")
            .map_err(|_| RiskError::Config("TWITTER_BEARER_TOKEN is not set".into()))?;
        let base_url = std::env::var("TWITTER_API_BASE")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.into());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(bearer_token)
        })
    }
}

/// `{ "data": ..., "errors": [...] }` envelope used by every v2 endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
struct ApiProblem {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ApiProblem {
    fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.detail.as_deref())
    }
}

/// Collector backed by the Twitter/X v2 REST API
pub struct TwitterClient {
    http: reqwest::Client,
    config: TwitterConfig,
}

impl TwitterClient {
    pub fn new(config: TwitterConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(TwitterConfig::from_env()?)
    }

    async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<Envelope<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(%url, "requesting social provider");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.bearer_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RiskError::RateLimited);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(RiskError::Upstream {
                status: status.as_u16(),
                message: problem_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Error bodies come either as an `errors` array or as a single top-level
/// problem (`{"title": "Unauthorized", "detail": "..."}` on 401)
#[derive(Debug, Deserialize)]
struct ProblemBody {
    #[serde(default)]
    errors: Vec<ApiProblem>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

fn problem_message(body: &str) -> Option<String> {
    let problem: ProblemBody = serde_json::from_str(body).ok()?;
    problem
        .errors
        .first()
        .and_then(ApiProblem::text)
        .or(problem.detail.as_deref())
        .or(problem.title.as_deref())
        .map(str::to_string)
}

#[async_trait]
impl SignalCollector for TwitterClient {
    async fn lookup(&self, username: &str) -> Result<Option<SocialAccount>> {
        let username = normalize_username(username)?;

        let user: Envelope<SocialAccount> = self
            .get(
                &format!("/users/by/username/{username}"),
                &[("user.fields", USER_FIELDS)],
            )
            .await?;

        let Some(mut account) = user.data else {
            if let Some(problem) = user.errors.first().and_then(ApiProblem::text) {
                tracing::info!(%username, problem, "account not found");
            }
            return Ok(None);
        };

        let tweets: Envelope<Vec<Tweet>> = self
            .get(
                &format!("/users/{}/tweets", account.id),
                &[("max_results", RECENT_TWEETS), ("tweet.fields", TWEET_FIELDS)],
            )
            .await?;

        account.recent_tweets = tweets.data.unwrap_or_default();
        tracing::info!(
            %username,
            id = %account.id,
            recent = account.recent_tweets.len(),
            "fetched account"
        );

        Ok(Some(account))
    }

    fn name(&self) -> &str {
        "Twitter"
    }
}
