//! Domain Models
//!
//! Request-scoped inputs and outputs of the scoring engine and aggregator.
//! Everything serializes as camelCase JSON for the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score below which an account is `Low` risk
pub const LOW_RISK_THRESHOLD: f64 = 30.0;

/// Score at or above which an account is `High` risk
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;

/// Interaction counts of one recent post
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub retweet_count: u64,
    pub like_count: u64,
    pub reply_count: u64,
}

impl ActivityItem {
    pub fn new(retweet_count: u64, like_count: u64, reply_count: u64) -> Self {
        Self {
            retweet_count,
            like_count,
            reply_count,
        }
    }

    /// Retweets + likes + replies
    pub fn interactions(&self) -> u64 {
        self.retweet_count
            .saturating_add(self.like_count)
            .saturating_add(self.reply_count)
    }
}

/// Typed social signals for one account
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSignals {
    pub created_at: DateTime<Utc>,
    pub follower_count: u64,
    pub tweet_count: u64,
    pub is_verified: bool,
    #[serde(default)]
    pub recent_activity: Vec<ActivityItem>,
}

impl AccountSignals {
    /// Whole days since account creation, never negative
    pub fn account_age_days(&self, now: DateTime<Utc>) -> u64 {
        let days = (now - self.created_at).num_days();
        u64::try_from(days).unwrap_or(0)
    }

    /// Total interactions per follower, averaged over recent posts.
    ///
    /// Zero when there are no followers or no recent posts.
    pub fn engagement_rate(&self) -> f64 {
        if self.follower_count == 0 || self.recent_activity.is_empty() {
            return 0.0;
        }

        let total: u64 = self
            .recent_activity
            .iter()
            .map(ActivityItem::interactions)
            .fold(0, u64::saturating_add);
        let posts = self.recent_activity.len().max(1) as f64;

        total as f64 / (self.follower_count as f64 * posts)
    }
}

/// Categorical risk label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a score onto the fixed thresholds
    pub fn from_score(score: f64) -> Self {
        if score < LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if score < HIGH_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived metrics reported alongside a score
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub account_age_days: u64,
    pub engagement_rate: f64,
    pub follower_count: u64,
    pub tweet_count: u64,
    pub is_verified: bool,
}

/// Output of the scoring engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    /// Always within 0..=100
    pub score: u8,
    pub level: RiskLevel,
    pub metrics: RiskMetrics,
}

/// Weighted contribution of one independent risk check
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    /// Check that produced this factor
    pub name: String,

    /// Clamped to 0.0..=1.0
    pub risk_weight: f64,

    /// True when the check failed and a fallback weight was substituted
    #[serde(default)]
    pub degraded: bool,

    /// Check-specific payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RiskFactor {
    pub fn new(name: impl Into<String>, risk_weight: f64) -> Self {
        Self {
            name: name.into(),
            risk_weight: clamp_weight(risk_weight),
            degraded: false,
            details: None,
        }
    }

    /// Fallback factor used when a check fails or times out
    pub fn fallback(name: impl Into<String>, risk_weight: f64) -> Self {
        Self {
            degraded: true,
            ..Self::new(name, risk_weight)
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Combined wallet and social risk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallRiskProfile {
    pub wallet_risk: f64,
    pub social_risk: f64,
    pub overall_risk: f64,
    pub level: RiskLevel,
    pub recommendations: Vec<String>,
    pub alerts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn signals(
        created_at: DateTime<Utc>,
        followers: u64,
        activity: Vec<ActivityItem>,
    ) -> AccountSignals {
        AccountSignals {
            created_at,
            follower_count: followers,
            tweet_count: 10,
            is_verified: false,
            recent_activity: activity,
        }
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(RiskLevel::from_score(29.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29.99), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::High);
    }

    #[test]
    fn test_future_creation_date_has_zero_age() {
        let now = Utc::now();
        let s = signals(now + Duration::days(12), 10, vec![]);
        assert_eq!(s.account_age_days(now), 0);
    }

    #[test]
    fn test_age_floors_partial_days() {
        let now = Utc::now();
        let s = signals(now - Duration::hours(47), 10, vec![]);
        assert_eq!(s.account_age_days(now), 1);
    }

    #[test]
    fn test_engagement_guards() {
        let now = Utc::now();
        let busy = vec![ActivityItem::new(5, 5, 5)];

        assert_eq!(signals(now, 0, busy).engagement_rate(), 0.0);
        assert_eq!(signals(now, 100, vec![]).engagement_rate(), 0.0);

        // 30 interactions over 2 posts and 100 followers
        let s = signals(now, 100, vec![ActivityItem::new(5, 5, 5), ActivityItem::new(10, 5, 0)]);
        assert!((s.engagement_rate() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_factor_weight_is_clamped() {
        assert_eq!(RiskFactor::new("a", 3.5).risk_weight, 1.0);
        assert_eq!(RiskFactor::new("b", -0.2).risk_weight, 0.0);
        assert_eq!(RiskFactor::new("c", f64::NAN).risk_weight, 0.0);
        assert!(RiskFactor::fallback("d", 0.5).degraded);
    }

    #[test]
    fn test_camel_case_json() {
        let factor = RiskFactor::new("liquidity", 0.3);
        let json = serde_json::to_value(&factor).unwrap();
        assert_eq!(json["riskWeight"], serde_json::json!(0.3));
        assert!(json.get("details").is_none());
    }
}
