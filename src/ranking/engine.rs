//! Ranking engine trait and the min-max implementation

use crate::error::{StatsError, StatsResult};
use crate::player::{PlayerCollection, PlayerRecord};
use crate::ranking::table::RankingTable;
use crate::types::{PlayerId, StatRange, WeightedCategory};
use tracing::debug;

/// Trait for turning a collection and weighted categories into a ranking
pub trait RankingEngine: Send + Sync {
    /// Rank the players of `ranked`, normalizing against the ranges of `bounds`
    ///
    /// `ranked` is expected to be a subset of `bounds`; passing a filtered
    /// collection as `ranked` and its source as `bounds` keeps the scale of
    /// the full population.
    fn rank_within(
        &self,
        bounds: &PlayerCollection,
        ranked: &PlayerCollection,
        categories: &[WeightedCategory],
        per_game: bool,
    ) -> StatsResult<RankingTable>;

    /// Rank every player of `collection` against the collection itself
    fn rank(
        &self,
        collection: &PlayerCollection,
        categories: &[WeightedCategory],
        per_game: bool,
    ) -> StatsResult<RankingTable> {
        self.rank_within(collection, collection, categories, per_game)
    }
}

/// Composite score as the weighted sum of min-max normalized categories
///
/// For every category the stat range is taken over the bounds collection;
/// a player's contribution is `weight * (stat - min) / range`. A category
/// where every player ties has no range and fails with
/// [`StatsError::DivisionByZero`]. Ties in composite score keep the
/// collection's insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxRankingEngine;

impl MinMaxRankingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Stat range of every category over `bounds`, rejecting flat categories
    pub fn category_bounds(
        bounds: &PlayerCollection,
        categories: &[WeightedCategory],
        per_game: bool,
    ) -> StatsResult<Vec<(WeightedCategory, StatRange)>> {
        categories
            .iter()
            .map(|category| {
                let range = bounds.stat_range(&category.name, per_game)?;
                if range.range == 0.0 {
                    return Err(StatsError::DivisionByZero {
                        category: category.name.clone(),
                    });
                }
                Ok((category.clone(), range))
            })
            .collect()
    }

    /// Weighted, normalized score of one player
    pub fn composite_score(
        record: &PlayerRecord,
        bounds: &[(WeightedCategory, StatRange)],
        per_game: bool,
    ) -> StatsResult<f64> {
        bounds.iter().try_fold(0.0, |score, (category, range)| {
            let stat = record.get_stat(&category.name, per_game)?;
            let normalized = range
                .normalize(stat)
                .ok_or_else(|| StatsError::DivisionByZero {
                    category: category.name.clone(),
                })?;
            Ok(score + category.weight * normalized)
        })
    }
}

impl RankingEngine for MinMaxRankingEngine {
    fn rank_within(
        &self,
        bounds: &PlayerCollection,
        ranked: &PlayerCollection,
        categories: &[WeightedCategory],
        per_game: bool,
    ) -> StatsResult<RankingTable> {
        if bounds.is_empty() {
            return Err(StatsError::EmptyCollection {
                category: categories
                    .first()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "ranking".to_string()),
            });
        }

        let category_bounds = Self::category_bounds(bounds, categories, per_game)?;

        let mut scores = ranked
            .all()
            .iter()
            .map(|record| -> StatsResult<(PlayerId, f64)> {
                Ok((
                    record.get_identity()?,
                    Self::composite_score(record, &category_bounds, per_game)?,
                ))
            })
            .collect::<StatsResult<Vec<_>>>()?;

        // Stable: equal scores stay in insertion order
        scores.sort_by(|a, b| a.1.total_cmp(&b.1));

        debug!(
            "Ranked {} players over {} categories (bounds from {} players)",
            scores.len(),
            category_bounds.len(),
            bounds.size()
        );

        Ok(RankingTable::from_sorted(scores))
    }
}
