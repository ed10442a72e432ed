//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use esg_portfolio_core::errors::CoreError;
use esg_portfolio_core::models::analytics::PortfolioScores;
use esg_portfolio_core::models::holding::{Holding, RawHolding};
use esg_portfolio_core::models::quote::StockPrices;
use esg_portfolio_core::models::settings::WeightingPolicy;
use esg_portfolio_core::services::quote_service::QuoteService;
use esg_portfolio_core::services::score_service::{format_score, ScoreService};

/// Application state.
pub struct AppState {
    /// Quote lookups through the configured providers
    pub quote_service: QuoteService,
    /// Portfolio score aggregation
    pub score_service: ScoreService,
}

impl AppState {
    /// Create state around a quote service.
    pub fn new(quote_service: QuoteService) -> Self {
        Self {
            quote_service,
            score_service: ScoreService::new(),
        }
    }
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

/// An error that renders as `{"error": ...}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Classify a quote lookup failure.
    ///
    /// Provider failures are reported as a bad ticker, since that is by far
    /// the most common cause upstream.
    pub fn from_quote_error(err: CoreError, ticker: &str) -> Self {
        match err {
            CoreError::InvalidTicker => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            CoreError::TickerNotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            e if e.is_provider_error() => {
                tracing::error!(ticker, error = %e, "quote provider error");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    format!(
                        "Failed to fetch data for ticker \"{ticker}\". Please ensure the ticker is valid."
                    ),
                )
            }
            e => {
                tracing::error!(ticker, error = %e, "unexpected error while fetching stock data");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error while fetching stock data.",
                )
            }
        }
    }

    /// Status code this error renders with.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Get the trailing three months of daily prices for a ticker.
pub async fn get_stock_prices(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<StockPrices>, ApiError> {
    state
        .quote_service
        .get_stock_prices(&ticker)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_quote_error(e, ticker.trim()))
}

/// Request body for portfolio scoring.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    /// Raw holding records
    pub holdings: Vec<RawHolding>,
    /// How records are weighted; defaults to requiring `amountInvested`
    #[serde(default)]
    pub weighting: WeightingPolicy,
}

/// Scores rendered for display.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormattedScores {
    /// Environmental score text
    #[serde(rename = "Environmental")]
    pub environmental: String,
    /// Social score text
    #[serde(rename = "Social")]
    pub social: String,
    /// Governance score text
    #[serde(rename = "Governance")]
    pub governance: String,
    /// Overall score text
    pub overall: String,
}

/// Response body for portfolio scoring.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// Numeric scores
    #[serde(flatten)]
    pub scores: PortfolioScores,
    /// Display strings for each score
    pub formatted: FormattedScores,
}

/// Validate raw holdings and compute their weighted ESG scores.
pub async fn score_portfolio(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let Json(request) = payload?;
    let holdings = request
        .holdings
        .into_iter()
        .map(|raw| Holding::from_raw(raw, request.weighting))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let scores = state.score_service.compute(&holdings);
    let categories = &scores.category_scores;

    Ok(Json(ScoreResponse {
        formatted: FormattedScores {
            environmental: format_score(categories.environmental),
            social: format_score(categories.social),
            governance: format_score(categories.governance),
            overall: format_score(scores.overall_score),
        },
        scores,
    }))
}
