//! Application State

use std::sync::Arc;

use market_sentiment::MarketSentiment;
use risk_engine::{ChatDirectory, RiskAnalyzer, RiskScorer, SignalCollector};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Social data provider (None if no Twitter token is configured)
    pub collector: Option<Arc<dyn SignalCollector>>,

    /// Telegram handle lookup (None if no bot token is configured)
    pub telegram: Option<Arc<dyn ChatDirectory>>,

    pub scorer: Arc<RiskScorer>,

    /// Wallet and social checks
    pub analyzer: Arc<RiskAnalyzer>,

    /// Stockbot (None if no chat-completions endpoint is configured)
    pub sentiment: Option<Arc<MarketSentiment>>,
}
