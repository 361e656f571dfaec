//! Snapshot filter configuration

use crate::error::StatsResult;
use crate::player::PlayerCollection;
use crate::types::Comparison;
use serde::{Deserialize, Serialize};

/// Which snapshot a filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterTarget {
    #[default]
    Both,
    Earlier,
    Later,
}

/// One threshold filter applied before comparison and ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub category: String,
    #[serde(default)]
    pub per_game: bool,
    pub comparison: Comparison,
    pub threshold: f64,
    #[serde(default)]
    pub applies_to: FilterTarget,
}

impl FilterConfig {
    pub fn new(category: &str, per_game: bool, comparison: Comparison, threshold: f64) -> Self {
        Self {
            category: category.to_string(),
            per_game,
            comparison,
            threshold,
            applies_to: FilterTarget::Both,
        }
    }

    pub fn only(mut self, target: FilterTarget) -> Self {
        self.applies_to = target;
        self
    }

    pub fn applies_to_earlier(&self) -> bool {
        matches!(self.applies_to, FilterTarget::Both | FilterTarget::Earlier)
    }

    pub fn applies_to_later(&self) -> bool {
        matches!(self.applies_to, FilterTarget::Both | FilterTarget::Later)
    }

    pub fn apply(&self, collection: &PlayerCollection) -> StatsResult<PlayerCollection> {
        collection.filter(&self.category, self.per_game, self.comparison, self.threshold)
    }
}

impl std::fmt::Display for FilterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.category,
            if self.per_game { "PG" } else { "" },
            self.comparison,
            self.threshold
        )
    }
}

/// Filters applied by default: regulars in both snapshots, productive players in the later one
pub fn default_filters() -> Vec<FilterConfig> {
    vec![
        FilterConfig::new("GP", false, Comparison::GreaterThan, 5.0),
        FilterConfig::new("Pts", true, Comparison::GreaterThan, 0.5).only(FilterTarget::Later),
    ]
}
