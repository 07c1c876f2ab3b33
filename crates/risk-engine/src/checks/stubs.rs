//! Static Checks
//!
//! No on-chain or platform analysis is performed yet: every check answers
//! with a fixed weight and a fixed detail payload.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{CheckCategory, CheckTarget, RiskCheck};
use crate::error::Result;
use crate::model::RiskFactor;

/// A check that always reports the same factor
#[derive(Clone, Debug)]
pub struct StaticCheck {
    name: &'static str,
    category: CheckCategory,
    weight: f64,
    fallback: f64,
    details: serde_json::Value,
}

impl StaticCheck {
    pub fn new(name: &'static str, category: CheckCategory, weight: f64, fallback: f64) -> Self {
        Self {
            name,
            category,
            weight,
            fallback,
            details: serde_json::Value::Null,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Exposure to low-liquidity pools
    pub fn liquidity() -> Self {
        Self::new("liquidity", CheckCategory::Wallet, 0.3, 0.5).with_details(json!({
            "riskFactors": {
                "lowLiquidity": false,
                "highConcentration": false,
                "volatileTokens": false,
            }
        }))
    }

    /// Interaction with known rug pulls
    pub fn rugpull() -> Self {
        Self::new("rugpull", CheckCategory::Wallet, 0.2, 0.5).with_details(json!({
            "knownRugPulls": [],
            "suspiciousProtocols": [],
        }))
    }

    /// Interaction with known scam contracts
    pub fn scam() -> Self {
        Self::new("scam", CheckCategory::Wallet, 0.2, 0.5).with_details(json!({
            "scamInteractions": [],
            "suspiciousContracts": [],
        }))
    }

    pub fn trading_behavior() -> Self {
        Self::new("trading_behavior", CheckCategory::Wallet, 0.3, 0.5).with_details(json!({
            "tradingPattern": "normal",
            "riskMetrics": {"frequency": "low", "slippage": "normal", "size": "medium"},
        }))
    }

    /// Money lost to gas
    pub fn gas_efficiency() -> Self {
        Self::new("gas_efficiency", CheckCategory::Wallet, 0.2, 0.5).with_details(json!({
            "gasEfficiency": "good",
            "metrics": {
                "averageGasUsed": "50000",
                "gasOptimization": "efficient",
                "potentialSavings": "0",
            }
        }))
    }

    pub fn twitter_mentions() -> Self {
        Self::new("twitter_mentions", CheckCategory::Social, 0.2, 0.5)
            .with_details(json!({"mentions": [], "sentiment": "neutral"}))
    }

    pub fn discord_activity() -> Self {
        Self::new("discord_activity", CheckCategory::Social, 0.1, 0.3)
            .with_details(json!({"activity": "normal"}))
    }

    pub fn telegram_signals() -> Self {
        Self::new("telegram_signals", CheckCategory::Social, 0.1, 0.3)
            .with_details(json!({"signals": []}))
    }

    pub fn github_activity() -> Self {
        Self::new("github_activity", CheckCategory::Social, 0.1, 0.2)
            .with_details(json!({"activity": "normal"}))
    }
}

#[async_trait]
impl RiskCheck for StaticCheck {
    fn name(&self) -> &str {
        self.name
    }

    fn category(&self) -> CheckCategory {
        self.category
    }

    fn fallback_weight(&self) -> f64 {
        self.fallback
    }

    async fn check(&self, target: &CheckTarget) -> Result<RiskFactor> {
        tracing::trace!(check = self.name, address = %target.address, "static check");

        let factor = RiskFactor::new(self.name, self.weight);
        Ok(if self.details.is_null() {
            factor
        } else {
            factor.with_details(self.details.clone())
        })
    }
}

/// The five wallet checks, in reporting order
pub fn wallet_checks() -> Vec<Arc<dyn RiskCheck>> {
    vec![
        Arc::new(StaticCheck::liquidity()),
        Arc::new(StaticCheck::rugpull()),
        Arc::new(StaticCheck::scam()),
        Arc::new(StaticCheck::trading_behavior()),
        Arc::new(StaticCheck::gas_efficiency()),
    ]
}

/// The four social checks, in reporting order
pub fn social_checks() -> Vec<Arc<dyn RiskCheck>> {
    vec![
        Arc::new(StaticCheck::twitter_mentions()),
        Arc::new(StaticCheck::discord_activity()),
        Arc::new(StaticCheck::telegram_signals()),
        Arc::new(StaticCheck::github_activity()),
    ]
}
