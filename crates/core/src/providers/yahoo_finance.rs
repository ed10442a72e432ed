use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use time::OffsetDateTime;
use yahoo_finance_api::{Quote, YahooError};

use crate::errors::CoreError;
use crate::models::quote::StockPrice;
use super::traits::QuoteProvider;

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance quote provider.
///
/// - **Free**: No API key required.
/// - **No strict rate limits** (unofficial public API).
/// - **Coverage**: Global equities, ETFs, indices, mutual funds.
///
/// Uses the `yahoo_finance_api` crate which wraps Yahoo Finance's
/// public chart endpoint.
///
/// **Note**: Not WASM-compatible (uses native reqwest/tokio connectors).
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    /// Convert a `chrono::NaiveDate` to `time::OffsetDateTime` (midnight UTC).
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let invalid = |e: &dyn std::fmt::Display| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Invalid date {date}: {e}"),
        };

        let month = time::Month::try_from(date.month() as u8).map_err(|e| invalid(&e))?;
        let odt = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| invalid(&e))?
            .with_hms(0, 0, 0)
            .map_err(|e| invalid(&e))?
            .assume_utc();
        Ok(odt)
    }

    /// Convert a unix timestamp (seconds) to `chrono::NaiveDate`.
    fn timestamp_to_naive_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_daily_history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<StockPrice>, CoreError> {
        let start = Self::to_offset_datetime(from)?;
        let end = Self::to_offset_datetime(to + chrono::Duration::days(1))?; // inclusive end

        let resp = self
            .connector
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch history for {symbol}: {e}"),
            })?;

        let quotes = rows_or_empty(symbol, resp.quotes())?;

        let bars: Vec<StockPrice> = quotes
            .iter()
            .filter_map(|q| {
                let date = Self::timestamp_to_naive_date(q.timestamp as i64)?;
                (date >= from && date <= to).then(|| StockPrice {
                    date,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume,
                })
            })
            .collect();

        Ok(bars)
    }
}

/// Yahoo reports an empty window as an error; turn it into zero rows so the
/// caller can tell "unknown ticker" apart from a failed request.
fn rows_or_empty(symbol: &str, quotes: Result<Vec<Quote>, YahooError>) -> Result<Vec<Quote>, CoreError> {
    match quotes {
        Ok(quotes) => Ok(quotes),
        Err(YahooError::NoQuotes | YahooError::NoResult) => Ok(Vec::new()),
        Err(e) => Err(CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse quotes for {symbol}: {e}"),
        }),
    }
}
