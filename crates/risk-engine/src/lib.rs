//! # risk-engine
//!
//! Heuristic risk scoring for portfolAI: a social-account score derived from
//! Twitter/X signals, plus an aggregate wallet/social risk profile. Telegram
//! handle verification and the starter portfolio builder live here too.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │ Signal Collector │──▶│  Scoring Engine  │──▶│    Aggregator    │
//! │ (Twitter API)    │   │  (rule table)    │   │ (0.7 W + 0.3 S)  │
//! └──────────────────┘   └──────────────────┘   └──────────────────┘
//!                                 ▲                       ▲
//!                                 │                       │
//!                        AccountSignals        RiskFactor per check
//! ```
//!
//! Scoring and aggregation are pure. Anything that touches the network lives
//! behind the [`SignalCollector`] and [`RiskCheck`] traits so callers can swap
//! in mocks.
//!
//! ## Score scale
//!
//! | score    | level  |
//! |----------|--------|
//! | `< 30`   | Low    |
//! | `30..70` | Medium |
//! | `>= 70`  | High   |

pub mod aggregate;
pub mod checks;
pub mod collector;
pub mod error;
pub mod model;
pub mod persona;
pub mod portfolio;
pub mod scoring;
pub mod verify;
pub mod wallet;

pub use aggregate::aggregate;
pub use checks::{
    CheckCategory, CheckTarget, RiskAnalysis, RiskAnalyzer, RiskCheck, SocialHandles,
};
pub use collector::{ChatDirectory, SignalCollector, SocialAccount, TelegramChat};
pub use error::{Result, RiskError};
pub use model::{
    AccountSignals, ActivityItem, OverallRiskProfile, RiskFactor, RiskLevel, RiskMetrics, RiskScore,
};
pub use persona::{Allocation, Persona};
pub use portfolio::{build_portfolio, Portfolio, PortfolioAsset, PortfolioInputs};
pub use scoring::{compute_risk_score, RiskScorer, RuleTable};
pub use verify::{verify_account, verify_telegram, VerificationOutcome, VerifiedAccount};
pub use wallet::{StaticWallet, WalletProvider};
