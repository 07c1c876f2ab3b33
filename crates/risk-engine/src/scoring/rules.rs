//! Scoring Rule Table
//!
//! A score is `base` plus the delta of every rule whose condition holds.
//! Conditions test the input signals, so rules never cascade and the
//! evaluation order only matters for tracing output.

use serde::{Deserialize, Serialize};

use crate::model::AccountSignals;

/// Stable identifier of a rule within a table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Verified,
    EstablishedAccount,
    NewAccount,
    LargeAudience,
    NoFollowers,
    ActivePoster,
    NoTweets,
    NoRecentActivity,
    Engaged,
}

/// Predicate over an account's signals
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Condition {
    Verified,
    AccountAgeAbove(u64),
    AccountAgeBelow(u64),
    FollowersAbove(u64),
    NoFollowers,
    TweetsAbove(u64),
    NoTweets,
    NoRecentActivity,
    EngagementAbove(f64),
}

/// Values a condition can be tested against
#[derive(Clone, Copy, Debug)]
pub struct Observed<'a> {
    pub signals: &'a AccountSignals,
    pub account_age_days: u64,
    pub engagement_rate: f64,
}

impl Condition {
    pub fn holds(&self, obs: &Observed<'_>) -> bool {
        let s = obs.signals;
        match *self {
            Condition::Verified => s.is_verified,
            Condition::AccountAgeAbove(days) => obs.account_age_days > days,
            Condition::AccountAgeBelow(days) => obs.account_age_days < days,
            Condition::FollowersAbove(n) => s.follower_count > n,
            Condition::NoFollowers => s.follower_count == 0,
            Condition::TweetsAbove(n) => s.tweet_count > n,
            Condition::NoTweets => s.tweet_count == 0,
            Condition::NoRecentActivity => s.recent_activity.is_empty(),
            Condition::EngagementAbove(rate) => obs.engagement_rate > rate,
        }
    }
}

/// One `condition → delta` entry
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub id: RuleId,
    pub condition: Condition,
    pub delta: i32,
}

impl ScoringRule {
    pub const fn new(id: RuleId, condition: Condition, delta: i32) -> Self {
        Self { id, condition, delta }
    }
}

/// Starting score before adjustments
pub const BASE_SCORE: i32 = 50;

/// Ordered rule table with its base score
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub base: i32,
    rules: Vec<ScoringRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleTable {
    /// Empty table with a base score
    pub fn new(base: i32) -> Self {
        Self {
            base,
            rules: Vec::new(),
        }
    }

    /// The full eight-rule table
    pub fn standard() -> Self {
        Self::new(BASE_SCORE)
            .with_rule(ScoringRule::new(RuleId::Verified, Condition::Verified, -20))
            .with_rule(ScoringRule::new(
                RuleId::EstablishedAccount,
                Condition::AccountAgeAbove(365),
                -15,
            ))
            .with_rule(ScoringRule::new(RuleId::NewAccount, Condition::AccountAgeBelow(30), 25))
            .with_rule(ScoringRule::new(
                RuleId::LargeAudience,
                Condition::FollowersAbove(1000),
                -10,
            ))
            .with_rule(ScoringRule::new(RuleId::NoFollowers, Condition::NoFollowers, 20))
            .with_rule(ScoringRule::new(RuleId::ActivePoster, Condition::TweetsAbove(100), -5))
            .with_rule(ScoringRule::new(RuleId::NoTweets, Condition::NoTweets, 15))
            .with_rule(ScoringRule::new(RuleId::Engaged, Condition::EngagementAbove(0.01), -5))
    }

    /// Weights used by the server-side verify endpoint: no engagement rule
    pub fn verification_route() -> Self {
        Self::standard().without(RuleId::Engaged)
    }

    /// Weights used by the client-side lookup: no `tweets > 100` rule, and
    /// the +15 applies to an empty recent-activity list instead of zero tweets
    pub fn client_lookup() -> Self {
        let mut table = Self::standard().without(RuleId::ActivePoster);
        for rule in &mut table.rules {
            if rule.id == RuleId::NoTweets {
                *rule = ScoringRule::new(RuleId::NoRecentActivity, Condition::NoRecentActivity, 15);
            }
        }
        table
    }

    /// Append a rule, replacing any existing rule with the same id in place
    pub fn with_rule(mut self, rule: ScoringRule) -> Self {
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    /// Drop a rule by id
    pub fn without(mut self, id: RuleId) -> Self {
        self.rules.retain(|r| r.id != id);
        self
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn get(&self, id: RuleId) -> Option<&ScoringRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Rules whose condition holds, in table order
    pub fn matching<'t>(
        &'t self,
        obs: &'t Observed<'_>,
    ) -> impl Iterator<Item = &'t ScoringRule> + 't {
        self.rules.iter().filter(move |r| r.condition.holds(obs))
    }

    /// Unclamped `base + Σ delta` over matching rules
    pub fn raw_score(&self, obs: &Observed<'_>) -> i64 {
        self.matching(obs)
            .fold(i64::from(self.base), |acc, r| acc + i64::from(r.delta))
    }
}
