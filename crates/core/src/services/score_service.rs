use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::analytics::{CategoryScores, PortfolioScores};
use crate::models::category::Category;
use crate::models::holding::Holding;
use crate::models::score::MAX_SCORE;

/// Computes investment-weighted ESG scores for a set of holdings.
///
/// Pure business logic: no I/O, no state. Every call recomputes from the
/// holdings it is given, so callers simply call again after each change.
///
/// Each holding contributes `sub_score * amount_invested` to its category's
/// total. Category scores divide by the total invested amount; the overall
/// score divides the grand total by `total invested * 3`. Both are rounded
/// to one decimal and are `0.0` when nothing is invested.
pub struct ScoreService;

impl ScoreService {
    pub fn new() -> Self {
        Self
    }

    /// Weighted average score per category.
    pub fn compute_category_scores(&self, holdings: &[Holding]) -> CategoryScores {
        WeightedTotals::accumulate(holdings).category_scores()
    }

    /// Weighted score across all categories.
    ///
    /// Computed from the raw weighted sums, not from the rounded category
    /// scores, so it can differ from their mean in the last decimal.
    pub fn compute_overall_score(&self, holdings: &[Holding]) -> f64 {
        WeightedTotals::accumulate(holdings).overall_score()
    }

    /// Category and overall scores from a single pass over the holdings.
    pub fn compute(&self, holdings: &[Holding]) -> PortfolioScores {
        let totals = WeightedTotals::accumulate(holdings);
        PortfolioScores {
            category_scores: totals.category_scores(),
            overall_score: totals.overall_score(),
        }
    }
}

impl Default for ScoreService {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a score for display: `"-"` for the no-data sentinel, else `"6.0 / 10"`.
pub fn format_score(score: f64) -> String {
    if score == 0.0 {
        "-".to_string()
    } else {
        format!("{score:.1} / {MAX_SCORE}")
    }
}

/// Round half away from zero to one decimal place.
///
/// Rounds the exact binary value, so `1.45` (stored just below) gives `1.4`.
pub fn round_to_tenth(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[derive(Debug, Default)]
struct WeightedTotals {
    total_weight: f64,
    per_category: [f64; Category::COUNT],
}

impl WeightedTotals {
    fn accumulate(holdings: &[Holding]) -> Self {
        let mut totals = Self::default();

        for holding in holdings {
            let weight = holding.weight();
            totals.total_weight += weight;

            // Entries past the last category are ignored; unreadable ones add nothing.
            for (i, score) in holding.scores.iter().take(Category::COUNT).enumerate() {
                if let Some(score) = score {
                    totals.per_category[i] += score.value() * weight;
                }
            }
        }

        totals
    }

    fn category_scores(&self) -> CategoryScores {
        let mut scores = CategoryScores::default();
        if self.total_weight > 0.0 {
            for category in Category::ALL {
                let avg = self.per_category[category.index()] / self.total_weight;
                scores.set(category, round_to_tenth(avg));
            }
        }
        scores
    }

    fn overall_score(&self) -> f64 {
        if self.total_weight > 0.0 {
            let sum: f64 = self.per_category.iter().sum();
            round_to_tenth(sum / (self.total_weight * Category::COUNT as f64))
        } else {
            0.0
        }
    }
}
