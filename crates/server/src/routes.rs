//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `state` - Shared application state
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Quotes
        .route("/api/stock/:ticker", get(handlers::get_stock_prices))
        // Scoring
        .route("/api/portfolio/scores", post(handlers::score_portfolio))
        .with_state(state)
}
