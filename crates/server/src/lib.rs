//! # ESG Portfolio Server
//!
//! HTTP front for the ESG portfolio core.
//!
//! ## Endpoints
//!
//! - `GET /api/stock/:ticker` — trailing three months of daily prices
//! - `POST /api/portfolio/scores` — investment-weighted ESG scores
//! - `GET /health`
//!
//! ## Usage
//!
//! ```ignore
//! use esg_portfolio_server::{Server, ServerConfig};
//!
//! let server = Server::new(ServerConfig::default());
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use esg_portfolio_core::providers::registry::QuoteProviderRegistry;
use esg_portfolio_core::services::quote_service::QuoteService;

pub use config::ServerConfig;
use handlers::AppState;

/// The ESG portfolio server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Create a server with the default quote providers for `config`.
    pub fn new(config: ServerConfig) -> Self {
        let registry = QuoteProviderRegistry::new_with_defaults(&config.api_keys());
        Self::with_quote_service(config, QuoteService::new(registry))
    }

    /// Create a server around an explicit quote service.
    pub fn with_quote_service(config: ServerConfig, quote_service: QuoteService) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(quote_service)),
        }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!(
            "Starting ESG portfolio server on {} (quote providers: {:?})",
            addr,
            self.state.quote_service.provider_names()
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
