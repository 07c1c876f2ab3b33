//! Account Verification
//!
//! Looks an account up through a [`SignalCollector`] and scores it, or
//! resolves a Telegram handle through a [`ChatDirectory`]. Transient provider
//! failures come back as tagged outcomes so callers own the UI state;
//! malformed data and bad handles stay errors.

use serde::{Deserialize, Serialize};

use crate::collector::{
    normalize_telegram_username, normalize_username, ChatDirectory, SignalCollector,
    SocialAccount, TelegramChat,
};
use crate::error::{Result, RiskError};
use crate::model::{AccountSignals, RiskScore};
use crate::scoring::RiskScorer;

/// A found and scored account
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedAccount {
    pub username: String,
    pub account: SocialAccount,
    pub risk: RiskScore,
}

/// Result of a verification request; `T` is what a successful lookup yields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum VerificationOutcome<T = VerifiedAccount> {
    Verified(T),
    NotFound,
    RateLimited,
    TransportError(String),
}

impl<T> VerificationOutcome<T> {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified(_))
    }
}

/// Map a lookup failure to its tagged outcome, or pass it through
fn failed_lookup<T>(
    provider: &str,
    username: &str,
    err: RiskError,
) -> Result<VerificationOutcome<T>> {
    match err {
        RiskError::RateLimited => {
            tracing::warn!(%username, provider, "rate limited");
            Ok(VerificationOutcome::RateLimited)
        }
        e if e.is_transport() => {
            tracing::warn!(%username, provider, error = %e, "provider unavailable");
            Ok(VerificationOutcome::TransportError(e.to_string()))
        }
        e => Err(e),
    }
}

/// Look up and score one handle
pub async fn verify_account(
    collector: &dyn SignalCollector,
    scorer: &RiskScorer,
    username: &str,
) -> Result<VerificationOutcome> {
    let username = normalize_username(username)?;

    let account = match collector.lookup(&username).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            tracing::info!(%username, provider = collector.name(), "account not found");
            return Ok(VerificationOutcome::NotFound);
        }
        Err(e) => return failed_lookup(collector.name(), &username, e),
    };

    let signals = AccountSignals::try_from(&account)?;
    let risk = scorer.score(&signals);

    tracing::info!(%username, score = risk.score, level = %risk.level, "account verified");

    Ok(VerificationOutcome::Verified(VerifiedAccount {
        username,
        account,
        risk,
    }))
}

/// Resolve a public Telegram handle
///
/// Telegram exposes no engagement metrics to bots, so a found chat is
/// reported as-is without a risk score.
pub async fn verify_telegram(
    directory: &dyn ChatDirectory,
    username: &str,
) -> Result<VerificationOutcome<TelegramChat>> {
    let username = normalize_telegram_username(username)?;

    match directory.get_chat(&username).await {
        Ok(Some(chat)) => {
            tracing::info!(%username, id = chat.id, kind = %chat.kind, "chat verified");
            Ok(VerificationOutcome::Verified(chat))
        }
        Ok(None) => {
            tracing::info!(%username, provider = directory.name(), "chat not found");
            Ok(VerificationOutcome::NotFound)
        }
        Err(e) => failed_lookup(directory.name(), &username, e),
    }
}
