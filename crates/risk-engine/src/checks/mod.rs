//! Risk Checks
//!
//! Independent wallet and social checks, each producing one [`RiskFactor`].
//! The [`RiskAnalyzer`] runs them concurrently and aggregates the results.

mod analyzer;
mod stubs;

pub use analyzer::{RiskAnalysis, RiskAnalyzer, DEFAULT_CHECK_TIMEOUT};
pub use stubs::{social_checks, wallet_checks, StaticCheck};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::RiskFactor;

/// Which side of the profile a check contributes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Wallet,
    Social,
}

/// Handles on the social platforms the user connected
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandles {
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

/// What a check runs against
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckTarget {
    pub address: String,
    #[serde(flatten)]
    pub handles: SocialHandles,
}

impl CheckTarget {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            handles: SocialHandles::default(),
        }
    }

    pub fn with_handles(mut self, handles: SocialHandles) -> Self {
        self.handles = handles;
        self
    }
}

/// One independent risk check
#[async_trait]
pub trait RiskCheck: Send + Sync {
    /// Unique check name, used in factor output and routing
    fn name(&self) -> &str;

    fn category(&self) -> CheckCategory;

    /// Weight substituted when the check fails or times out
    fn fallback_weight(&self) -> f64;

    async fn check(&self, target: &CheckTarget) -> Result<RiskFactor>;
}
