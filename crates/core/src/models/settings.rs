use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a holding's weight is derived from its raw record.
///
/// Older portfolio records only carry the quoted `price` and no explicit
/// invested amount. Whether that price may stand in for the invested amount
/// is a deliberate choice made here rather than silently in the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightingPolicy {
    /// Require an explicit `amountInvested` on every record.
    #[default]
    AmountInvested,
    /// Use `amountInvested` when present and non-zero, otherwise `price`.
    FallbackToPrice,
}

impl std::fmt::Display for WeightingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightingPolicy::AmountInvested => write!(f, "amountInvested"),
            WeightingPolicy::FallbackToPrice => write!(f, "fallbackToPrice"),
        }
    }
}

/// User-configurable settings that travel with the portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// How raw holding records are weighted.
    #[serde(default)]
    pub weighting: WeightingPolicy,

    /// Optional API keys for quote providers that require them.
    /// Keys: provider name (e.g., "alphavantage").
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}
