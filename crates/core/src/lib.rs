pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    analytics::{CategoryScores, PortfolioScores},
    holding::{Holding, RawHolding},
    portfolio::Portfolio,
    settings::{Settings, WeightingPolicy},
};
use services::{portfolio_service::PortfolioService, score_service::ScoreService};

use errors::CoreError;

/// Main entry point for the ESG portfolio core library.
/// Owns the portfolio value and the services that operate on it.
///
/// Scores are never cached: every read recomputes them from the current
/// holdings, so there is nothing to invalidate after a mutation.
#[must_use]
#[derive(Default)]
pub struct EsgPortfolio {
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    score_service: ScoreService,
}

impl std::fmt::Debug for EsgPortfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsgPortfolio")
            .field("holdings", &self.portfolio.holdings.len())
            .field("settings", &self.portfolio.settings)
            .finish()
    }
}

impl EsgPortfolio {
    /// Create an empty portfolio with default settings.
    pub fn create_new() -> Self {
        Self::default()
    }

    /// Wrap an existing portfolio value.
    pub fn from_portfolio(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            ..Self::default()
        }
    }

    /// Load a portfolio from its JSON representation.
    ///
    /// Every stored holding goes through the same checks as [`Self::add_holding`].
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let stored: Portfolio = serde_json::from_str(json)?;
        let mut loaded = Self::from_portfolio(Portfolio {
            holdings: Vec::with_capacity(stored.holdings.len()),
            settings: stored.settings,
        });

        for stored_holding in stored.holdings {
            let mut holding =
                Holding::new(stored_holding.ticker, stored_holding.amount_invested, stored_holding.scores)?;
            holding.name = stored_holding.name;
            loaded.add_holding(holding)?;
        }

        Ok(loaded)
    }

    /// Serialize the portfolio (holdings and settings) as pretty JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    /// Borrow the underlying portfolio value.
    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Give up ownership of the underlying portfolio value.
    #[must_use]
    pub fn into_portfolio(self) -> Portfolio {
        self.portfolio
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add a validated holding.
    pub fn add_holding(&mut self, holding: Holding) -> Result<(), CoreError> {
        self.portfolio_service.add_holding(&mut self.portfolio, holding)
    }

    /// Validate a raw record with the configured weighting policy, then add it.
    pub fn add_raw_holding(&mut self, raw: RawHolding) -> Result<(), CoreError> {
        let holding = Holding::from_raw(raw, self.portfolio.settings.weighting)?;
        self.add_holding(holding)
    }

    /// Remove a holding by ticker (case-insensitive).
    pub fn remove_holding(&mut self, ticker: &str) -> Result<Holding, CoreError> {
        self.portfolio_service.remove_holding(&mut self.portfolio, ticker)
    }

    /// Change the invested amount of an existing holding.
    pub fn set_amount(&mut self, ticker: &str, amount: f64) -> Result<(), CoreError> {
        self.portfolio_service.set_amount(&mut self.portfolio, ticker, amount)
    }

    /// Look up a holding by ticker (case-insensitive).
    #[must_use]
    pub fn get_holding(&self, ticker: &str) -> Option<&Holding> {
        self.portfolio_service.get_holding(&self.portfolio, ticker)
    }

    /// All holdings in insertion order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.portfolio.holdings
    }

    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.portfolio.holdings.len()
    }

    #[must_use]
    pub fn total_invested(&self) -> f64 {
        self.portfolio.total_invested()
    }

    // ── Scores ──────────────────────────────────────────────────────

    /// Category and overall scores for the current holdings.
    #[must_use]
    pub fn scores(&self) -> PortfolioScores {
        self.score_service.compute(&self.portfolio.holdings)
    }

    #[must_use]
    pub fn category_scores(&self) -> CategoryScores {
        self.score_service
            .compute_category_scores(&self.portfolio.holdings)
    }

    #[must_use]
    pub fn overall_score(&self) -> f64 {
        self.score_service
            .compute_overall_score(&self.portfolio.holdings)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.portfolio.settings
    }

    /// Choose how future raw records are weighted. Existing holdings keep
    /// the amount they were added with.
    pub fn set_weighting(&mut self, policy: WeightingPolicy) {
        self.portfolio.settings.weighting = policy;
    }

    /// Set an API key for a quote provider (e.g., "alphavantage").
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.portfolio.settings.api_keys.insert(provider, key);
    }

    /// Remove an API key. Returns whether one was set.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        self.portfolio.settings.api_keys.remove(provider).is_some()
    }
}
