//! Server configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use risk_engine::RuleTable;

/// Which historical weight set the social scorer uses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RulePreset {
    #[default]
    Standard,
    VerificationRoute,
    ClientLookup,
}

impl RulePreset {
    pub fn table(self) -> RuleTable {
        match self {
            RulePreset::Standard => RuleTable::standard(),
            RulePreset::VerificationRoute => RuleTable::verification_route(),
            RulePreset::ClientLookup => RuleTable::client_lookup(),
        }
    }
}

impl FromStr for RulePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(RulePreset::Standard),
            "verification" | "verification_route" => Ok(RulePreset::VerificationRoute),
            "client" | "client_lookup" => Ok(RulePreset::ClientLookup),
            other => bail!("unknown rule preset '{other}'"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Address to bind the HTTP server.
    pub bind_addr: String,
    /// Upper bound on each wallet/social check.
    pub check_timeout: Duration,
    /// Social scoring weights.
    pub rule_preset: RulePreset,
    /// Optional system message sent ahead of every stockbot question.
    pub stockbot_system_prompt: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Twitter and stockbot credentials are read by their own clients so a
    /// missing token disables that feature instead of failing startup.
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let timeout_ms: u64 = std::env::var("RISK_CHECK_TIMEOUT_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .context("RISK_CHECK_TIMEOUT_MS must be a positive integer")?;
        if timeout_ms == 0 {
            bail!("RISK_CHECK_TIMEOUT_MS must be greater than zero");
        }

        let rule_preset = match std::env::var("RISK_RULE_PRESET") {
            Ok(raw) => raw
                .parse()
                .context("RISK_RULE_PRESET must be standard, verification or client")?,
            Err(_) => RulePreset::default(),
        };

        let stockbot_system_prompt = std::env::var("STOCKBOT_SYSTEM_PROMPT")
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Config {
            bind_addr,
            check_timeout: Duration::from_millis(timeout_ms),
            rule_preset,
            stockbot_system_prompt,
        })
    }
}
