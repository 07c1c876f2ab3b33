//! portfolAI HTTP Server
//!
//! Axum-based server exposing Twitter/X and Telegram verification,
//! wallet/social risk analysis, personas, portfolio suggestions and the
//! stockbot as JSON endpoints.

mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_sentiment::{ChatCompletionsProvider, LlmProvider, MarketSentiment};
use risk_engine::{
    collector::{TelegramClient, TwitterClient},
    ChatDirectory, RiskAnalyzer, RiskScorer, SignalCollector,
};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Social data provider
    let collector: Option<Arc<dyn SignalCollector>> = match TwitterClient::from_env() {
        Ok(client) => {
            tracing::info!("✓ Twitter client configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!("⚠ Twitter not configured - verification disabled: {}", e);
            tracing::warn!("  Set TWITTER_BEARER_TOKEN in .env");
            None
        }
    };

    let telegram: Option<Arc<dyn ChatDirectory>> = match TelegramClient::from_env() {
        Ok(client) => {
            tracing::info!("✓ Telegram client configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!("⚠ Telegram not configured - verification disabled: {}", e);
            tracing::warn!("  Set TELEGRAM_BOT_TOKEN in .env");
            None
        }
    };

    // Stockbot
    let sentiment = match ChatCompletionsProvider::from_env() {
        Ok(provider) => {
            let base_url = provider.config().base_url.clone();
            if provider.health_check().await.unwrap_or(false) {
                tracing::info!("✓ Connected to {}", base_url);
            } else {
                tracing::warn!("⚠ {} not reachable - stockbot requests will fail", base_url);
            }
            let options = provider.config().default_options();
            let mut bot = MarketSentiment::new(Arc::new(provider), options);
            if let Some(prompt) = &config.stockbot_system_prompt {
                tracing::info!("✓ Stockbot system prompt set");
                bot = bot.with_system_prompt(prompt.as_str());
            }
            Some(Arc::new(bot))
        }
        Err(e) => {
            tracing::warn!("⚠ Stockbot not configured: {}", e);
            tracing::warn!("  Set LLAMAEDGE_BASE_URL and LLAMAEDGE_MODEL_NAME in .env");
            None
        }
    };

    let analyzer = RiskAnalyzer::with_default_checks(config.check_timeout);
    tracing::info!(
        timeout = ?config.check_timeout,
        preset = ?config.rule_preset,
        "risk checks ready"
    );

    // Build application state
    let state = AppState {
        collector,
        telegram,
        scorer: Arc::new(RiskScorer::new(config.rule_preset.table())),
        analyzer: Arc::new(analyzer),
        sentiment,
    };

    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 portfolAI server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                          - Health check");
    tracing::info!("  GET  /api/twitter/verify/{{username}}   - Verify and score a handle");
    tracing::info!("  GET  /api/telegram/verify/{{username}}  - Resolve a Telegram handle");
    tracing::info!("  GET  /api/defi/liquidity/{{address}}    - Wallet checks");
    tracing::info!("       also security/rugpull, security/scam, trading/behavior, gas/efficiency");
    tracing::info!("  POST /api/risk/analyze                - Full risk profile");
    tracing::info!("  POST /api/risk/score                  - Score a raw account record");
    tracing::info!("  GET  /api/personas                    - Investment personas");
    tracing::info!("  POST /api/portfolio/build             - Starter portfolio");
    tracing::info!("  POST /api/stockbot                    - Market sentiment chat");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
