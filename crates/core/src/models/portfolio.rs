use serde::{Deserialize, Serialize};

use super::holding::Holding;
use super::settings::Settings;

/// The caller-owned portfolio: holdings plus the settings used to build them.
///
/// There is no shared global instance. Whoever owns this value passes it to
/// the services and recomputes scores after each change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Positions in insertion order.
    pub holdings: Vec<Holding>,

    #[serde(default)]
    pub settings: Settings,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holdings(holdings: Vec<Holding>) -> Self {
        Self {
            holdings,
            settings: Settings::default(),
        }
    }

    /// Sum of every holding's invested amount.
    pub fn total_invested(&self) -> f64 {
        self.holdings.iter().map(Holding::weight).sum()
    }
}
