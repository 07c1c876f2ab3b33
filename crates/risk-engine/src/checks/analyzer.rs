//! Concurrent Risk Analyzer
//!
//! Runs every registered check at once, waits for all of them, and only then
//! aggregates. A check that errors or exceeds the timeout contributes its
//! fallback weight instead of failing the analysis.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::{social_checks, wallet_checks, CheckCategory, CheckTarget, RiskCheck, SocialHandles};
use crate::aggregate::aggregate;
use crate::error::{Result, RiskError};
use crate::model::{OverallRiskProfile, RiskFactor};
use crate::wallet::{validate_address, WalletProvider};

pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Aggregated profile plus the factors that produced it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub address: String,
    pub profile: OverallRiskProfile,
    pub wallet_factors: Vec<RiskFactor>,
    pub social_factors: Vec<RiskFactor>,
}

impl RiskAnalysis {
    /// Number of factors that fell back to a default weight
    pub fn degraded_count(&self) -> usize {
        self.wallet_factors
            .iter()
            .chain(&self.social_factors)
            .filter(|f| f.degraded)
            .count()
    }
}

pub struct RiskAnalyzer {
    wallet: Vec<Arc<dyn RiskCheck>>,
    social: Vec<Arc<dyn RiskCheck>>,
    timeout: Duration,
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::with_default_checks(DEFAULT_CHECK_TIMEOUT)
    }
}

impl RiskAnalyzer {
    /// Analyzer with no checks registered
    pub fn new(timeout: Duration) -> Self {
        Self {
            wallet: Vec::new(),
            social: Vec::new(),
            timeout,
        }
    }

    /// Analyzer with the five wallet and four social checks
    pub fn with_default_checks(timeout: Duration) -> Self {
        let mut analyzer = Self::new(timeout);
        for check in wallet_checks().into_iter().chain(social_checks()) {
            analyzer.register(check);
        }
        analyzer
    }

    pub fn register(&mut self, check: Arc<dyn RiskCheck>) {
        match check.category() {
            CheckCategory::Wallet => self.wallet.push(check),
            CheckCategory::Social => self.social.push(check),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Look up a registered check by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn RiskCheck>> {
        self.wallet
            .iter()
            .chain(&self.social)
            .find(|c| c.name() == name)
            .cloned()
    }

    /// Run one check under the timeout, falling back on any failure
    pub async fn run_check(&self, check: &dyn RiskCheck, target: &CheckTarget) -> RiskFactor {
        let outcome = match tokio::time::timeout(self.timeout, check.check(target)).await {
            Ok(result) => result,
            Err(_) => Err(RiskError::Timeout {
                check: check.name().to_string(),
            }),
        };

        match outcome {
            Ok(factor) => factor,
            Err(e) => {
                tracing::warn!(
                    check = check.name(),
                    fallback = check.fallback_weight(),
                    error = %e,
                    "risk check failed, using fallback weight"
                );
                RiskFactor::fallback(check.name(), check.fallback_weight())
            }
        }
    }

    async fn run_all(
        &self,
        checks: &[Arc<dyn RiskCheck>],
        target: &CheckTarget,
    ) -> Vec<RiskFactor> {
        join_all(checks.iter().map(|c| self.run_check(c.as_ref(), target))).await
    }

    /// Run every check concurrently and aggregate once all have resolved
    pub async fn analyze(&self, target: &CheckTarget) -> RiskAnalysis {
        let (wallet_factors, social_factors) = futures::join!(
            self.run_all(&self.wallet, target),
            self.run_all(&self.social, target),
        );

        let profile = aggregate(&wallet_factors, &social_factors);
        let analysis = RiskAnalysis {
            address: target.address.clone(),
            profile,
            wallet_factors,
            social_factors,
        };

        tracing::info!(
            address = %analysis.address,
            wallet_risk = analysis.profile.wallet_risk,
            social_risk = analysis.profile.social_risk,
            overall_risk = analysis.profile.overall_risk,
            degraded = analysis.degraded_count(),
            "risk analysis complete"
        );

        analysis
    }

    /// Resolve the address through the wallet capability, then analyze
    pub async fn analyze_wallet(
        &self,
        wallet: &dyn WalletProvider,
        handles: SocialHandles,
    ) -> Result<RiskAnalysis> {
        let address = validate_address(&wallet.request_accounts().await?)?;
        let target = CheckTarget::new(address).with_handles(handles);
        Ok(self.analyze(&target).await)
    }
}
