use serde::{Deserialize, Serialize};

/// One of the three ESG pillars a holding is scored on.
///
/// Sub-scores are positional: index 0 is Environmental, 1 is Social,
/// 2 is Governance. See [`Category::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Environmental,
    Social,
    Governance,
}

impl Category {
    /// All categories in sub-score order.
    pub const ALL: [Category; 3] = [
        Category::Environmental,
        Category::Social,
        Category::Governance,
    ];

    /// Number of categories every holding is scored on.
    pub const COUNT: usize = Self::ALL.len();

    /// Category for a sub-score position, if the position is in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this category in a holding's sub-score list.
    pub fn index(self) -> usize {
        match self {
            Category::Environmental => 0,
            Category::Social => 1,
            Category::Governance => 2,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Environmental => write!(f, "Environmental"),
            Category::Social => write!(f, "Social"),
            Category::Governance => write!(f, "Governance"),
        }
    }
}
