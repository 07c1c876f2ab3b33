//! Wallet Capability
//!
//! The scoring core never talks to a browser wallet. Callers resolve the
//! account address through a [`WalletProvider`] and hand it over.

use async_trait::async_trait;

use crate::error::{Result, RiskError};

/// Source of the user's wallet address
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Return the first authorized account address
    async fn request_accounts(&self) -> Result<String>;
}

/// Provider for an address the caller already knows
#[derive(Clone, Debug)]
pub struct StaticWallet {
    address: String,
}

impl StaticWallet {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[async_trait]
impl WalletProvider for StaticWallet {
    async fn request_accounts(&self) -> Result<String> {
        validate_address(&self.address)
    }
}

/// Check for `0x` + 40 hex digits and return the lowercased address
pub fn validate_address(address: &str) -> Result<String> {
    let trimmed = address.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| RiskError::validation(format!("address '{trimmed}' must start with 0x")))?;

    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RiskError::validation(format!(
            "address '{trimmed}' must be 40 hex digits after 0x"
        )));
    }

    Ok(format!("0x{}", hex.to_ascii_lowercase()))
}
