use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use super::category::Category;
use super::score::SubScore;
use super::settings::WeightingPolicy;

/// A holding record as the dashboard's state layer supplies it.
///
/// Nothing here is validated yet; see [`Holding::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHolding {
    pub ticker: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub amount_invested: Option<f64>,

    /// Quoted price at the time the holding was added.
    #[serde(default)]
    pub price: Option<f64>,

    /// Sub-scores encoded as `"<value>/10"`, in [`Category::ALL`] order.
    #[serde(default, alias = "options", alias = "scores")]
    pub sub_scores: Vec<String>,
}

/// One validated portfolio position.
///
/// The ticker is uppercased on construction. `scores` is positional: entry
/// `i` belongs to `Category::ALL[i]`, a `None` entry is an unreadable
/// sub-score, and entries past the last category are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Dollars invested; this is the holding's weight in every aggregate.
    pub amount_invested: f64,

    pub scores: Vec<Option<SubScore>>,
}

impl Holding {
    /// Build a holding, normalising the ticker and checking it with [`Holding::validate`].
    pub fn new(
        ticker: impl Into<String>,
        amount_invested: f64,
        scores: Vec<Option<SubScore>>,
    ) -> Result<Self, CoreError> {
        let holding = Self {
            ticker: ticker.into().trim().to_uppercase(),
            name: None,
            amount_invested,
            scores,
        };
        holding.validate()?;
        Ok(holding)
    }

    /// Check the rules every holding in a portfolio must satisfy.
    ///
    /// Rules:
    /// - Ticker must not be blank
    /// - Amount must be finite and non-negative
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.ticker.trim().is_empty() {
            return Err(CoreError::ValidationError("Ticker must not be empty".into()));
        }
        if !self.amount_invested.is_finite() || self.amount_invested < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Invested amount for {} must be a non-negative number, got {}",
                self.ticker, self.amount_invested
            )));
        }
        Ok(())
    }

    /// Build a holding from plain numeric sub-scores (Environmental, Social, Governance).
    pub fn with_scores(
        ticker: impl Into<String>,
        amount_invested: f64,
        scores: [f64; Category::COUNT],
    ) -> Result<Self, CoreError> {
        let scores = scores
            .into_iter()
            .map(|v| SubScore::new(v).map(Some))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(ticker, amount_invested, scores)
    }

    /// Attach a display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate a raw record and resolve its weight according to `policy`.
    ///
    /// Rules:
    /// - Ticker must not be blank
    /// - Weight must be finite and non-negative
    /// - A sub-score that is not a number is kept as `None`
    /// - A numeric sub-score outside `[0, 10]` is rejected
    pub fn from_raw(raw: RawHolding, policy: WeightingPolicy) -> Result<Self, CoreError> {
        let ticker = raw.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(CoreError::ValidationError("Ticker must not be empty".into()));
        }

        let amount_invested = resolve_weight(&ticker, raw.amount_invested, raw.price, policy)?;

        let mut scores = Vec::with_capacity(raw.sub_scores.len());
        for raw_score in &raw.sub_scores {
            let parsed = SubScore::parse_lenient(raw_score)?;
            if parsed.is_none() {
                tracing::debug!(%ticker, raw = %raw_score, "unreadable sub-score skipped");
            }
            scores.push(parsed);
        }

        let holding = Self {
            ticker,
            name: raw.name,
            amount_invested,
            scores,
        };
        holding.validate()?;
        Ok(holding)
    }

    /// The weight this holding carries in aggregates.
    pub fn weight(&self) -> f64 {
        self.amount_invested
    }

    /// Sub-score for a category, if present and readable.
    pub fn score(&self, category: Category) -> Option<SubScore> {
        self.scores.get(category.index()).copied().flatten()
    }
}

fn resolve_weight(
    ticker: &str,
    amount_invested: Option<f64>,
    price: Option<f64>,
    policy: WeightingPolicy,
) -> Result<f64, CoreError> {
    match policy {
        WeightingPolicy::AmountInvested => amount_invested.ok_or_else(|| {
            CoreError::ValidationError(format!("Holding {ticker} has no invested amount"))
        }),
        WeightingPolicy::FallbackToPrice => amount_invested
            .filter(|a| *a != 0.0)
            .or(price)
            .or(amount_invested)
            .ok_or_else(|| {
                CoreError::ValidationError(format!(
                    "Holding {ticker} has neither an invested amount nor a price"
                ))
            }),
    }
}
