use serde::{Deserialize, Serialize};

use super::category::Category;

/// Investment-weighted score per ESG category, each rounded to one decimal.
///
/// A value of `0.0` means there was no invested amount to average over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(rename = "Environmental")]
    pub environmental: f64,

    #[serde(rename = "Social")]
    pub social: f64,

    #[serde(rename = "Governance")]
    pub governance: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Environmental => self.environmental,
            Category::Social => self.social,
            Category::Governance => self.governance,
        }
    }

    pub(crate) fn set(&mut self, category: Category, score: f64) {
        match category {
            Category::Environmental => self.environmental = score,
            Category::Social => self.social = score,
            Category::Governance => self.governance = score,
        }
    }

    /// `(category, score)` pairs in [`Category::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Aggregated ESG scores for a whole portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioScores {
    pub category_scores: CategoryScores,

    /// Weighted score across all categories, rounded to one decimal.
    pub overall_score: f64,
}
