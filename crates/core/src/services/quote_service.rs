use chrono::{Months, NaiveDate};

use crate::errors::CoreError;
use crate::models::quote::StockPrices;
use crate::providers::registry::QuoteProviderRegistry;

/// Length of the trailing quote window, in calendar months.
pub const QUOTE_WINDOW_MONTHS: u32 = 3;

/// Looks up daily price history for a ticker through the provider registry.
///
/// Providers are tried in priority order; the first that answers wins.
/// If all of them fail, the last provider error is returned.
pub struct QuoteService {
    registry: QuoteProviderRegistry,
}

impl QuoteService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    /// Names of the registered providers, highest priority first.
    pub fn provider_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Daily bars for `ticker` over the trailing window ending today (UTC).
    pub async fn get_stock_prices(&self, ticker: &str) -> Result<StockPrices, CoreError> {
        let today = chrono::Utc::now().date_naive();
        self.get_stock_prices_as_of(ticker, today).await
    }

    /// Daily bars for `ticker` over the trailing window ending on `today`.
    pub async fn get_stock_prices_as_of(
        &self,
        ticker: &str,
        today: NaiveDate,
    ) -> Result<StockPrices, CoreError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(CoreError::InvalidTicker);
        }

        let (from, to) = quote_window(today);

        if self.registry.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in self.registry.providers() {
            match provider.get_daily_history(ticker, from, to).await {
                Ok(mut bars) => {
                    if bars.is_empty() {
                        return Err(CoreError::TickerNotFound(ticker.to_string()));
                    }
                    bars.sort_by_key(|b| b.date);
                    tracing::debug!(
                        ticker,
                        provider = provider.name(),
                        bars = bars.len(),
                        "quote history fetched"
                    );
                    return Ok(StockPrices {
                        ticker: ticker.to_string(),
                        stock_prices: bars,
                    });
                }
                Err(e) => {
                    tracing::warn!(ticker, provider = provider.name(), error = %e, "quote provider failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }
}

/// Inclusive `[today - 3 months, today]` window.
///
/// Month subtraction clamps to the last valid day (May 31 → Feb 28/29).
pub fn quote_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today
        .checked_sub_months(Months::new(QUOTE_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    (from, today)
}
