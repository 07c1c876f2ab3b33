//! Aggregator
//!
//! Combines wallet and social factors into an [`OverallRiskProfile`].
//!
//! Weights are summed without normalization. Each weight is clamped to
//! `[0, 1]` when the factor is built, so `wallet_risk` is bounded by the number
//! of wallet factors and `social_risk` by the number of social factors.

use crate::model::{OverallRiskProfile, RiskFactor, RiskLevel};

pub const WALLET_SHARE: f64 = 0.7;
pub const SOCIAL_SHARE: f64 = 0.3;

/// Risk sum above which advice is emitted
pub const RECOMMENDATION_THRESHOLD: f64 = 50.0;

/// Risk sum above which an alert is raised
pub const ALERT_THRESHOLD: f64 = 70.0;

const WALLET_RECOMMENDATIONS: [&str; 2] =
    ["Diversify your portfolio", "Review high-risk protocols"];
const SOCIAL_RECOMMENDATIONS: [&str; 2] =
    ["Enable 2FA on all accounts", "Review social media security"];

const WALLET_ALERT: &str = "⚠️ High wallet risk detected";
const SOCIAL_ALERT: &str = "⚠️ Suspicious social activity detected";

/// Sum of clamped weights
pub fn total_weight(factors: &[RiskFactor]) -> f64 {
    factors.iter().map(|f| f.risk_weight).sum()
}

/// Build the overall profile from independent factor lists
pub fn aggregate(
    wallet_factors: &[RiskFactor],
    social_factors: &[RiskFactor],
) -> OverallRiskProfile {
    let wallet_risk = total_weight(wallet_factors);
    let social_risk = total_weight(social_factors);
    let overall_risk = WALLET_SHARE * wallet_risk + SOCIAL_SHARE * social_risk;

    OverallRiskProfile {
        wallet_risk,
        social_risk,
        overall_risk,
        level: RiskLevel::from_score(overall_risk),
        recommendations: recommendations(wallet_risk, social_risk),
        alerts: alerts(wallet_risk, social_risk),
    }
}

/// Fixed advice, wallet-related first
pub fn recommendations(wallet_risk: f64, social_risk: f64) -> Vec<String> {
    let mut out = Vec::new();
    if wallet_risk > RECOMMENDATION_THRESHOLD {
        out.extend(WALLET_RECOMMENDATIONS.iter().map(|s| (*s).to_string()));
    }
    if social_risk > RECOMMENDATION_THRESHOLD {
        out.extend(SOCIAL_RECOMMENDATIONS.iter().map(|s| (*s).to_string()));
    }
    out
}

pub fn alerts(wallet_risk: f64, social_risk: f64) -> Vec<String> {
    let mut out = Vec::new();
    if wallet_risk > ALERT_THRESHOLD {
        out.push(WALLET_ALERT.to_string());
    }
    if social_risk > ALERT_THRESHOLD {
        out.push(SOCIAL_ALERT.to_string());
    }
    out
}
