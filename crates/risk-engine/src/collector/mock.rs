//! Mock Signal Collector
//!
//! For tests and offline demos. Serves accounts from memory.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{normalize_username, SignalCollector, SocialAccount};
use crate::error::{Result, RiskError};

/// Failure the mock should simulate instead of answering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockFailure {
    RateLimited,
    Unavailable,
}

/// In-memory collector keyed by lowercase handle
#[derive(Default)]
pub struct MockCollector {
    accounts: HashMap<String, SocialAccount>,
    failure: Option<MockFailure>,
}

impl MockCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, username: &str, account: SocialAccount) -> Self {
        self.accounts.insert(username.to_lowercase(), account);
        self
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SignalCollector for MockCollector {
    async fn lookup(&self, username: &str) -> Result<Option<SocialAccount>> {
        let username = normalize_username(username)?;

        match self.failure {
            Some(MockFailure::RateLimited) => Err(RiskError::RateLimited),
            Some(MockFailure::Unavailable) => Err(RiskError::Upstream {
                status: 503,
                message: "mock provider down".into(),
            }),
            None => Ok(self.accounts.get(&username.to_lowercase()).cloned()),
        }
    }

    fn name(&self) -> &str {
        "MockCollector"
    }
}
