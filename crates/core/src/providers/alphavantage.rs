use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::StockPrice;
use super::traits::QuoteProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "Alpha Vantage";

/// Alpha Vantage quote provider, used as a fallback behind Yahoo Finance.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints).
/// - **Requires**: API key (set via settings as "alphavantage").
/// - **Data**: compact daily series, the last 100 trading days.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the provider at a different endpoint (e.g. a local stub).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: base_url.into(),
        }
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyData>>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,

    /// Rate-limit notices arrive under either key.
    #[serde(rename = "Note", alias = "Information")]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl DailyData {
    fn to_stock_price(&self, date: NaiveDate) -> Option<StockPrice> {
        Some(StockPrice {
            date,
            open: self.open.parse().ok()?,
            high: self.high.parse().ok()?,
            low: self.low.parse().ok()?,
            close: self.close.parse().ok()?,
            volume: self.volume.parse().ok()?,
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_daily_history(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<StockPrice>, CoreError> {
        let resp: TimeSeriesResponse = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", &symbol.to_uppercase()),
                ("outputsize", "compact"),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse time series for {symbol}: {e}"),
            })?;

        let time_series = series_or_error(resp, symbol)?;

        let mut bars: Vec<StockPrice> = time_series
            .iter()
            .filter_map(|(date_str, data)| {
                let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
                if date >= from && date <= to {
                    data.to_stock_price(date)
                } else {
                    None
                }
            })
            .collect();

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn series_or_error(
    resp: TimeSeriesResponse,
    symbol: &str,
) -> Result<HashMap<String, DailyData>, CoreError> {
    if let Some(message) = resp.error_message {
        return Err(CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("{symbol}: {message}"),
        });
    }
    resp.time_series.ok_or_else(|| CoreError::Api {
        provider: PROVIDER.into(),
        message: resp.note.unwrap_or_else(|| {
            format!("No time series data for {symbol}. API limit may be exceeded.")
        }),
    })
}
