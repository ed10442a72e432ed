use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::quote::StockPrice;

/// Trait abstraction for all stock quote providers.
///
/// Each upstream API (Yahoo Finance, Alpha Vantage) implements this trait.
/// If an API stops working or changes, only that one implementation is
/// replaced; the quote service and the HTTP layer are untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Daily OHLCV bars for `symbol` between `from` and `to` (inclusive).
    /// Returns an empty Vec when the provider knows the symbol but has no bars.
    async fn get_daily_history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<StockPrice>, CoreError>;
}
