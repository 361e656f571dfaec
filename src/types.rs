//! Common types used throughout the statistics engine

use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identity of a player as returned by [`crate::player::PlayerRecord::get_identity`]
pub type PlayerId = String;

/// Raw attribute map of a single player row
pub type Attributes = std::collections::BTreeMap<String, String>;

/// Names of the designated categories every record is read through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSchema {
    /// Category holding the player name
    pub identity_key: String,
    /// Category holding games played, the per-game denominator
    pub games_played_key: String,
    /// Number of spurious leading characters the source puts before each name
    pub identity_prefix_len: usize,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            identity_key: "Name".to_string(),
            games_played_key: "GP".to_string(),
            identity_prefix_len: 1,
        }
    }
}

/// Threshold comparison used by [`crate::player::PlayerCollection::filter`]
///
/// Only strict comparisons exist; callers wanting an inclusive bound adjust
/// the threshold instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
}

impl Comparison {
    /// Whether `value` passes the comparison against `threshold`
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::GreaterThan => value > threshold,
            Comparison::LessThan => value < threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::GreaterThan => ">",
            Comparison::LessThan => "<",
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Comparison {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Comparison::GreaterThan),
            "<" => Ok(Comparison::LessThan),
            other => Err(StatsError::InvalidComparison {
                symbol: other.to_string(),
            }),
        }
    }
}

/// A category and the signed weight it carries in a composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCategory {
    pub name: String,
    /// Negative weights penalize a category where lower is better
    pub weight: f64,
}

impl WeightedCategory {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

impl FromStr for WeightedCategory {
    type Err = String;

    /// Parses `NAME:WEIGHT`, or a bare `NAME` with weight 1
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((name, weight)) => {
                let weight = weight
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid weight in {s:?}"))?;
                if name.trim().is_empty() {
                    return Err(format!("Missing category name in {s:?}"));
                }
                Ok(Self::new(name.trim(), weight))
            }
            None if !s.trim().is_empty() => Ok(Self::new(s.trim(), 1.0)),
            None => Err("Empty category".to_string()),
        }
    }
}

/// Distribution of one category over one collection at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: f64,
    pub max: f64,
    /// Unweighted arithmetic mean over every record
    pub average: f64,
    /// `|max - min|`
    pub range: f64,
}

impl StatRange {
    /// Position of `value` between min and max, or `None` when every value is equal
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if self.range == 0.0 {
            None
        } else {
            Some((value - self.min) / self.range)
        }
    }
}

/// One line of a ranking: a player, its composite score and its rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1 for the lowest composite score, N for the highest
    pub rank: usize,
    pub identity: PlayerId,
    pub score: f64,
}

impl std::fmt::Display for RankingEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:<4} {:<28} {:>9.4}", self.rank, self.identity, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_parsing() {
        assert_eq!(">".parse::<Comparison>().unwrap(), Comparison::GreaterThan);
        assert_eq!(" < ".parse::<Comparison>().unwrap(), Comparison::LessThan);
        assert!(matches!(
            ">=".parse::<Comparison>(),
            Err(StatsError::InvalidComparison { .. })
        ));
    }

    #[test]
    fn test_comparison_is_strict() {
        assert!(Comparison::GreaterThan.holds(5.1, 5.0));
        assert!(!Comparison::GreaterThan.holds(5.0, 5.0));
        assert!(Comparison::LessThan.holds(4.9, 5.0));
        assert!(!Comparison::LessThan.holds(5.0, 5.0));
    }

    #[test]
    fn test_weighted_category_parsing() {
        let parsed: WeightedCategory = "PPG:0.5".parse().unwrap();
        assert_eq!(parsed, WeightedCategory::new("PPG", 0.5));

        let parsed: WeightedCategory = "PIM:-1".parse().unwrap();
        assert_eq!(parsed.weight, -1.0);

        let parsed: WeightedCategory = "G".parse().unwrap();
        assert_eq!(parsed.weight, 1.0);

        assert!("G:abc".parse::<WeightedCategory>().is_err());
        assert!(":1".parse::<WeightedCategory>().is_err());
    }

    #[test]
    fn test_stat_range_normalize() {
        let range = StatRange {
            min: 0.0,
            max: 20.0,
            average: 10.0,
            range: 20.0,
        };
        assert_eq!(range.normalize(10.0), Some(0.5));

        let flat = StatRange {
            min: 3.0,
            max: 3.0,
            average: 3.0,
            range: 0.0,
        };
        assert_eq!(flat.normalize(3.0), None);
    }
}
