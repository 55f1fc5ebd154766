use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::PatternRecord;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Source collection order. There is no popularity signal behind this
    /// key; the name is kept for the UI.
    #[default]
    Popularity,
    /// Name ascending, ties by slug.
    Alphabetical,
    /// Difficulty ascending, ties by name.
    Difficulty,
    /// Id descending. Ids are assigned in insertion order, so this
    /// approximates "newest first" without a timestamp.
    Recency,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Popularity => write!(f, "popularity"),
            Self::Alphabetical => write!(f, "alphabetical"),
            Self::Difficulty => write!(f, "difficulty"),
            Self::Recency => write!(f, "recency"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(Self::Popularity),
            "alphabetical" | "name" => Ok(Self::Alphabetical),
            "difficulty" => Ok(Self::Difficulty),
            "recency" | "newest" => Ok(Self::Recency),
            _ => Err(anyhow::anyhow!("unknown sort key: {s}")),
        }
    }
}

/// Case-folded comparison first so "adapter" sorts next to "Adapter",
/// then the raw text to keep the order total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl SortKey {
    #[must_use]
    pub fn compare(self, a: &PatternRecord, b: &PatternRecord) -> Ordering {
        match self {
            Self::Popularity => Ordering::Equal,
            Self::Alphabetical => compare_names(&a.name, &b.name).then_with(|| a.slug.cmp(&b.slug)),
            Self::Difficulty => a
                .difficulty
                .cmp(&b.difficulty)
                .then_with(|| compare_names(&a.name, &b.name)),
            Self::Recency => b.id.cmp(&a.id),
        }
    }

    /// Stable in-place ordering of an already-filtered view.
    pub fn sort(self, records: &mut [&PatternRecord]) {
        if self == Self::Popularity {
            return;
        }
        records.sort_by(|a, b| self.compare(a, b));
    }
}
