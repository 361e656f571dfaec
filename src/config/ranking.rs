//! Ranking configuration

use crate::types::WeightedCategory;
use serde::{Deserialize, Serialize};

/// Categories and weights used for the composite ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub per_game: bool,
    pub categories: Vec<WeightedCategory>,
    /// Normalize against the later snapshot before filters instead of the filtered players
    pub bounds_from_unfiltered: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            per_game: true,
            categories: vec![
                WeightedCategory::new("Hits", 1.0),
                WeightedCategory::new("SOG", 1.0),
                WeightedCategory::new("G", 1.0),
                WeightedCategory::new("A", 1.0),
                WeightedCategory::new("PPG", 0.5),
                WeightedCategory::new("PPA", 0.5),
            ],
            bounds_from_unfiltered: false,
        }
    }
}
