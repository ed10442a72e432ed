use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::portfolio::Portfolio;

/// Manages the holdings in a caller-owned portfolio.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Add a holding to the portfolio.
    /// Rejects blank tickers, invalid amounts and tickers already present.
    pub fn add_holding(&self, portfolio: &mut Portfolio, holding: Holding) -> Result<(), CoreError> {
        holding.validate()?;

        if self.get_holding(portfolio, &holding.ticker).is_some() {
            return Err(CoreError::DuplicateHolding(holding.ticker));
        }

        tracing::debug!(ticker = %holding.ticker, amount = holding.amount_invested, "holding added");
        portfolio.holdings.push(holding);
        Ok(())
    }

    /// Remove a holding by ticker (case-insensitive) and return it.
    pub fn remove_holding(&self, portfolio: &mut Portfolio, ticker: &str) -> Result<Holding, CoreError> {
        let idx = self.position(portfolio, ticker)?;
        let removed = portfolio.holdings.remove(idx);
        tracing::debug!(ticker = %removed.ticker, "holding removed");
        Ok(removed)
    }

    /// Change the invested amount of an existing holding.
    /// The new amount must be strictly positive.
    pub fn set_amount(&self, portfolio: &mut Portfolio, ticker: &str, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Invested amount must be positive, got {amount}"
            )));
        }

        let idx = self.position(portfolio, ticker)?;
        portfolio.holdings[idx].amount_invested = amount;
        Ok(())
    }

    /// Find a holding by ticker (case-insensitive).
    pub fn get_holding<'a>(&self, portfolio: &'a Portfolio, ticker: &str) -> Option<&'a Holding> {
        let upper = ticker.trim().to_uppercase();
        portfolio.holdings.iter().find(|h| h.ticker == upper)
    }

    fn position(&self, portfolio: &Portfolio, ticker: &str) -> Result<usize, CoreError> {
        let upper = ticker.trim().to_uppercase();
        portfolio
            .holdings
            .iter()
            .position(|h| h.ticker == upper)
            .ok_or(CoreError::HoldingNotFound(upper))
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
