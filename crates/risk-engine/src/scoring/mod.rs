//! Risk Scoring Engine
//!
//! Turns [`AccountSignals`] into a bounded [`RiskScore`]. Pure and
//! deterministic for a fixed clock; never fails for typed input.

mod rules;

pub use rules::{Condition, Observed, RuleId, RuleTable, ScoringRule, BASE_SCORE};

use chrono::{DateTime, Utc};

use crate::model::{AccountSignals, RiskLevel, RiskMetrics, RiskScore};

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

/// Scores accounts against a rule table
#[derive(Clone, Debug, Default)]
pub struct RiskScorer {
    table: RuleTable,
}

impl RiskScorer {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Score against the current time
    pub fn score(&self, signals: &AccountSignals) -> RiskScore {
        self.score_at(signals, Utc::now())
    }

    /// Score against an explicit clock
    pub fn score_at(&self, signals: &AccountSignals, now: DateTime<Utc>) -> RiskScore {
        let account_age_days = signals.account_age_days(now);
        let engagement_rate = signals.engagement_rate();

        let observed = Observed {
            signals,
            account_age_days,
            engagement_rate,
        };

        let raw = self.table.raw_score(&observed);
        let score = u8::try_from(raw.clamp(MIN_SCORE, MAX_SCORE)).unwrap_or(u8::MAX);

        tracing::debug!(
            raw,
            score,
            account_age_days,
            engagement_rate,
            rules = ?self.table.matching(&observed).map(|r| r.id).collect::<Vec<_>>(),
            "scored account"
        );

        RiskScore {
            score,
            level: RiskLevel::from_score(f64::from(score)),
            metrics: RiskMetrics {
                account_age_days,
                engagement_rate,
                follower_count: signals.follower_count,
                tweet_count: signals.tweet_count,
                is_verified: signals.is_verified,
            },
        }
    }
}

/// Score with the standard rule table against the current time
pub fn compute_risk_score(signals: &AccountSignals) -> RiskScore {
    RiskScorer::default().score(signals)
}
