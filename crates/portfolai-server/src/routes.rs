//! Router

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    analyze_risk, gas_efficiency_check, get_persona, health_check, liquidity_check, list_personas,
    rugpull_check, scam_check, score_account, stockbot, suggest_portfolio, trading_behavior_check,
    verify_telegram_handle, verify_twitter,
};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))

        // Social verification
        .route("/api/twitter/verify/{username}", get(verify_twitter))
        .route("/api/telegram/verify/{username}", get(verify_telegram_handle))

        // Wallet checks
        .route("/api/defi/liquidity/{address}", get(liquidity_check))
        .route("/api/security/rugpull/{address}", get(rugpull_check))
        .route("/api/security/scam/{address}", get(scam_check))
        .route("/api/trading/behavior/{address}", get(trading_behavior_check))
        .route("/api/gas/efficiency/{address}", get(gas_efficiency_check))

        // Aggregate risk
        .route("/api/risk/analyze", post(analyze_risk))
        .route("/api/risk/score", post(score_account))

        // Personas, portfolio & stockbot
        .route("/api/personas", get(list_personas))
        .route("/api/personas/{id}", get(get_persona))
        .route("/api/portfolio/build", post(suggest_portfolio))
        .route("/api/stockbot", post(stockbot))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use market_sentiment::{Completion, GenerationOptions, LlmProvider, MarketSentiment, Message};
    use risk_engine::{
        collector::MockCollector, ChatDirectory, RiskAnalyzer, RiskError, RiskScorer,
        SignalCollector, SocialAccount, TelegramChat,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    struct CannedProvider;

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn health_check(&self) -> market_sentiment::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> market_sentiment::Result<Completion> {
            Ok(Completion {
                content: format!("You asked: {}", messages[0].content),
                model: options.model.clone(),
                usage: None,
                finish_reason: None,
            })
        }
    }

    /// Knows a single public channel, `portfolai`
    struct OneChannel;

    #[async_trait]
    impl ChatDirectory for OneChannel {
        async fn get_chat(&self, username: &str) -> risk_engine::Result<Option<TelegramChat>> {
            match username {
                "portfolai" => Ok(Some(TelegramChat {
                    id: -1003,
                    kind: "channel".into(),
                    title: Some("portfolAI".into()),
                    ..TelegramChat::default()
                })),
                "throttled" => Err(RiskError::RateLimited),
                _ => Ok(None),
            }
        }

        fn name(&self) -> &str {
            "one-channel"
        }
    }

    fn veteran() -> SocialAccount {
        serde_json::from_value(json!({
            "id": "1",
            "username": "veteran",
            "created_at": "2012-03-01T00:00:00Z",
            "verified": true,
            "public_metrics": {"followers_count": 5000, "tweet_count": 500},
            "recentTweets": [
                {"public_metrics": {"retweet_count": 20, "like_count": 80, "reply_count": 10}}
            ]
        }))
        .unwrap()
    }

    fn state(configured: bool) -> AppState {
        let collector = configured.then(|| {
            let mock = MockCollector::new().with_account("veteran", veteran());
            Arc::new(mock) as Arc<dyn SignalCollector>
        });
        let telegram = configured.then(|| Arc::new(OneChannel) as Arc<dyn ChatDirectory>);
        let sentiment = configured.then(|| {
            let options = GenerationOptions::new("test");
            Arc::new(MarketSentiment::new(Arc::new(CannedProvider), options))
        });

        AppState {
            collector,
            telegram,
            scorer: Arc::new(RiskScorer::default()),
            analyzer: Arc::new(RiskAnalyzer::default()),
            sentiment,
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(router(state(true)), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["twitterConfigured"], true);
        assert_eq!(body["telegramConfigured"], true);

        let (_, body) = send(router(state(false)), get_req("/health")).await;
        assert_eq!(body["sentimentConfigured"], false);
    }

    #[tokio::test]
    async fn test_verify_known_account() {
        let request = get_req("/api/twitter/verify/veteran");
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "verified");
        // 50 - 20 - 15 - 10 - 5 - 5
        assert_eq!(body["data"]["risk"]["score"], 0);
        assert_eq!(body["data"]["risk"]["level"], "Low");
    }

    #[tokio::test]
    async fn test_verify_outcomes_map_to_status() {
        let request = get_req("/api/twitter/verify/ghost");
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": "not_found"}));

        let request = get_req("/api/twitter/verify/has%20space");
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let request = get_req("/api/twitter/verify/veteran");
        let (status, _) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_verify_telegram() {
        let request = get_req("/api/telegram/verify/@portfolai");
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "verified");
        assert_eq!(body["data"]["type"], "channel");
        assert_eq!(body["data"]["id"], -1003);

        let request = get_req("/api/telegram/verify/nobody_here");
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": "not_found"}));

        let request = get_req("/api/telegram/verify/throttled");
        let (status, _) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

        let request = get_req("/api/telegram/verify/abc");
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let request = get_req("/api/telegram/verify/portfolai");
        let (status, body) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "TELEGRAM_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_wallet_check_routes() {
        let request = get_req(&format!("/api/defi/liquidity/{ADDR}"));
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "liquidity");
        assert_eq!(body["riskWeight"], 0.3);

        let request = get_req(&format!("/api/gas/efficiency/{ADDR}"));
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["details"]["gasEfficiency"], "good");

        let (status, _) = send(router(state(true)), get_req("/api/security/scam/0x123")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze() {
        let target = json!({"address": ADDR, "twitter": "veteran"});
        let request = post_json("/api/risk/analyze", &target);
        let (status, body) = send(router(state(true)), request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["analysisId"].is_string());
        assert_eq!(body["walletFactors"].as_array().unwrap().len(), 5);
        assert_eq!(body["socialFactors"].as_array().unwrap().len(), 4);
        let overall = body["profile"]["overallRisk"].as_f64().unwrap();
        assert!((overall - 0.99).abs() < 1e-9);
        assert_eq!(body["profile"]["alerts"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_address() {
        let request = post_json("/api/risk/analyze", &json!({"address": "vitalik.eth"}));
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_malformed_body() {
        let request = post_json("/api/risk/analyze", &json!({}));
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert!(body["error"].as_str().unwrap().contains("address"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/risk/analyze")
            .body(Body::from("address=0x1"))
            .unwrap();
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_score_account() {
        let account = serde_json::to_value(veteran()).unwrap();
        let request = post_json("/api/risk/score", &account);
        let (status, body) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 0);
        assert_eq!(body["metrics"]["followerCount"], 5000);

        let broken = json!({"id": "2", "created_at": "2020-01-01T00:00:00Z"});
        let request = post_json("/api/risk/score", &broken);
        let (status, body) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_personas() {
        let (status, body) = send(router(state(false)), get_req("/api/personas")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);

        let request = get_req("/api/personas/warren-buffett");
        let (status, body) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Warren Buffett");

        let (status, _) = send(router(state(false)), get_req("/api/personas/nobody")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_portfolio_build() {
        let inputs = json!({"twitterVerified": true, "tokens": ["ETH", "USDC"]});
        let request = post_json("/api/portfolio/build", &inputs);
        let (status, body) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalInvestment"], 50);
        assert_eq!(body["assets"][0], json!({"name": "Twitter Stocks", "allocation": 20}));
        assert_eq!(body["assets"][1], json!({"name": "Ethereum", "allocation": 30}));

        let request = post_json("/api/portfolio/build", &json!({}));
        let (status, body) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"assets": [], "totalInvestment": 0}));

        let request = post_json("/api/portfolio/build", &json!({"tokens": "ETH"}));
        let (status, body) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_stockbot() {
        let request = post_json("/api/stockbot", &json!({"message": "Is AAPL a buy?"}));
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "You asked: Is AAPL a buy?");

        let request = post_json("/api/stockbot", &json!({"message": "  "}));
        let (status, _) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = post_json("/api/stockbot", &json!({"message": "hi"}));
        let (status, body) = send(router(state(false)), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "STOCKBOT_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_stockbot_rejects_malformed_body() {
        let request = post_json("/api/stockbot", &json!({}));
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert!(body["error"].as_str().unwrap().contains("message"));

        let request = post_json("/api/stockbot", &json!({"message": 42}));
        let (status, body) = send(router(state(true)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }
}
