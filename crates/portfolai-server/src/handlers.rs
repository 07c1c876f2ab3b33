//! HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use market_sentiment::SentimentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use risk_engine::{
    build_portfolio,
    persona::Persona,
    verify::{verify_account, verify_telegram, VerificationOutcome},
    wallet::validate_address,
    AccountSignals, CheckTarget, Portfolio, PortfolioInputs, RiskAnalysis, RiskError, RiskFactor,
    RiskScore, TelegramChat,
};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub twitter_configured: bool,
    pub telegram_configured: bool,
    pub sentiment_configured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    #[serde(flatten)]
    pub analysis: RiskAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct StockbotRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StockbotResponse {
    pub response: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn risk_error(e: &RiskError) -> ApiError {
    let (status, code) = match e {
        RiskError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        RiskError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
        RiskError::Config(_) => (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED"),
        e if e.is_transport() => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };
    api_error(status, code, e.user_message())
}

fn sentiment_error(e: &SentimentError) -> ApiError {
    let (status, code) = match e {
        SentimentError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "STOCKBOT_ERROR"),
    };
    api_error(status, code, e.user_message())
}

/// Missing fields, wrong types and non-JSON bodies all answer 400
fn invalid_body(rejection: &JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "rejected request body");
    api_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", rejection.body_text())
}

fn outcome_status<T>(outcome: &VerificationOutcome<T>) -> StatusCode {
    match outcome {
        VerificationOutcome::Verified(_) => StatusCode::OK,
        VerificationOutcome::NotFound => StatusCode::NOT_FOUND,
        VerificationOutcome::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        VerificationOutcome::TransportError(_) => StatusCode::BAD_GATEWAY,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        twitter_configured: state.collector.is_some(),
        telegram_configured: state.telegram.is_some(),
        sentiment_configured: state.sentiment.is_some(),
    })
}

/// Look up and score a Twitter/X handle
pub async fn verify_twitter(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<(StatusCode, Json<VerificationOutcome>), ApiError> {
    let collector = state.collector.as_deref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "TWITTER_NOT_CONFIGURED",
            "Twitter verification is not configured",
        )
    })?;

    let outcome = verify_account(collector, &state.scorer, &username)
        .await
        .map_err(|e| {
            tracing::warn!("Verification error: {}", e);
            risk_error(&e)
        })?;

    Ok((outcome_status(&outcome), Json(outcome)))
}

/// Resolve a public Telegram handle through the Bot API
pub async fn verify_telegram_handle(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<(StatusCode, Json<VerificationOutcome<TelegramChat>>), ApiError> {
    let directory = state.telegram.as_deref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "TELEGRAM_NOT_CONFIGURED",
            "Telegram verification is not configured",
        )
    })?;

    let outcome = verify_telegram(directory, &username).await.map_err(|e| {
        tracing::warn!("Telegram verification error: {}", e);
        risk_error(&e)
    })?;

    Ok((outcome_status(&outcome), Json(outcome)))
}

/// Run a single registered wallet check
async fn wallet_check(
    state: &AppState,
    name: &str,
    address: &str,
) -> Result<Json<RiskFactor>, ApiError> {
    let address = validate_address(address).map_err(|e| risk_error(&e))?;
    let check = state.analyzer.get(name).ok_or_else(|| {
        let msg = format!("No check named '{name}'");
        api_error(StatusCode::NOT_FOUND, "CHECK_NOT_FOUND", msg)
    })?;

    let factor = state
        .analyzer
        .run_check(check.as_ref(), &CheckTarget::new(address))
        .await;
    Ok(Json(factor))
}

pub async fn liquidity_check(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<RiskFactor>, ApiError> {
    wallet_check(&state, "liquidity", &address).await
}

pub async fn rugpull_check(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<RiskFactor>, ApiError> {
    wallet_check(&state, "rugpull", &address).await
}

pub async fn scam_check(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<RiskFactor>, ApiError> {
    wallet_check(&state, "scam", &address).await
}

pub async fn trading_behavior_check(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<RiskFactor>, ApiError> {
    wallet_check(&state, "trading_behavior", &address).await
}

pub async fn gas_efficiency_check(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<RiskFactor>, ApiError> {
    wallet_check(&state, "gas_efficiency", &address).await
}

/// Full wallet + social profile
pub async fn analyze_risk(
    State(state): State<AppState>,
    payload: Result<Json<CheckTarget>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(target) = payload.map_err(|r| invalid_body(&r))?;
    let address = validate_address(&target.address).map_err(|e| risk_error(&e))?;
    let target = CheckTarget::new(address).with_handles(target.handles);

    let analysis_id = Uuid::new_v4();
    tracing::info!(%analysis_id, address = %target.address, "starting risk analysis");

    let analysis = state.analyzer.analyze(&target).await;

    Ok(Json(AnalyzeResponse {
        analysis_id,
        analysis,
    }))
}

/// Score a raw provider account record
///
/// The body is parsed here rather than by the `Json` extractor so malformed
/// records map to 400 with the usual error shape.
pub async fn score_account(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<RiskScore>, ApiError> {
    let signals = AccountSignals::from_json(&body).map_err(|e| risk_error(&e))?;
    Ok(Json(state.scorer.score(&signals)))
}

pub async fn list_personas() -> Json<&'static [Persona]> {
    Json(Persona::all())
}

pub async fn get_persona(Path(id): Path<String>) -> Result<Json<&'static Persona>, ApiError> {
    Persona::find(&id).map(Json).ok_or_else(|| {
        api_error(StatusCode::NOT_FOUND, "PERSONA_NOT_FOUND", format!("No persona '{id}'"))
    })
}

/// Suggest a starter portfolio from verification and wallet results
pub async fn suggest_portfolio(
    payload: Result<Json<PortfolioInputs>, JsonRejection>,
) -> Result<Json<Portfolio>, ApiError> {
    let Json(inputs) = payload.map_err(|r| invalid_body(&r))?;
    let portfolio = build_portfolio(&inputs);
    tracing::info!(
        assets = portfolio.assets.len(),
        total = portfolio.total_investment,
        "portfolio built"
    );
    Ok(Json(portfolio))
}

/// Forward a market question to the chat-completions provider
pub async fn stockbot(
    State(state): State<AppState>,
    payload: Result<Json<StockbotRequest>, JsonRejection>,
) -> Result<Json<StockbotResponse>, ApiError> {
    let Json(payload) = payload.map_err(|r| invalid_body(&r))?;
    let bot = state.sentiment.as_ref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "STOCKBOT_NOT_CONFIGURED",
            "The stockbot is not configured",
        )
    })?;

    let response = bot.ask(&payload.message).await.map_err(|e| {
        tracing::error!("Stockbot error: {}", e);
        sentiment_error(&e)
    })?;

    Ok(Json(StockbotResponse { response }))
}
