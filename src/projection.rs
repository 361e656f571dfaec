//! Read-only projection of a collection onto three categories for plotting
//!
//! The engine owns no rendering. It hands a plotter the `(identity, x, y,
//! size)` points lazily, plus the size category's range so bubbles can be
//! scaled against the whole population.

use crate::error::{StatsError, StatsResult};
use crate::player::PlayerCollection;
use crate::types::{PlayerId, StatRange};
use serde::Serialize;

/// Base bubble size for the smallest value of the size category
pub const DOT_SIZE: f64 = 20.0;

/// One plotted player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub identity: PlayerId,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Scatter view over a collection
#[derive(Debug, Clone)]
pub struct ScatterProjection<'a> {
    collection: &'a PlayerCollection,
    x: String,
    y: String,
    size: String,
    per_game: bool,
    size_range: StatRange,
}

impl<'a> ScatterProjection<'a> {
    /// Fails when the collection is empty or the size category cannot be read
    pub fn new(
        collection: &'a PlayerCollection,
        x: impl Into<String>,
        y: impl Into<String>,
        size: impl Into<String>,
        per_game: bool,
    ) -> StatsResult<Self> {
        let size = size.into();
        let size_range = collection.stat_range(&size, per_game)?;
        Ok(Self {
            collection,
            x: x.into(),
            y: y.into(),
            size,
            per_game,
            size_range,
        })
    }

    pub fn size_range(&self) -> StatRange {
        self.size_range
    }

    /// Points in collection order, read on demand
    pub fn points(&self) -> impl Iterator<Item = StatsResult<ScatterPoint>> + '_ {
        self.collection.all().iter().map(move |record| -> StatsResult<ScatterPoint> {
            Ok(ScatterPoint {
                identity: record.get_identity()?,
                x: record.get_stat(&self.x, self.per_game)?,
                y: record.get_stat(&self.y, self.per_game)?,
                size: record.get_stat(&self.size, self.per_game)?,
            })
        })
    }

    /// Bubble area for a size value: from `DOT_SIZE` at the minimum up to six times that at the maximum
    pub fn bubble_size(&self, size: f64) -> StatsResult<f64> {
        let normalized = self
            .size_range
            .normalize(size)
            .ok_or_else(|| StatsError::DivisionByZero {
                category: self.size.clone(),
            })?;
        Ok(DOT_SIZE + DOT_SIZE * 5.0 * normalized)
    }

    pub fn x_label(&self) -> String {
        self.label(&self.x)
    }

    pub fn y_label(&self) -> String {
        self.label(&self.y)
    }

    pub fn title(&self) -> String {
        format!(
            "X-{}, Y-{}, Bubble Size-{}",
            self.x_label(),
            self.y_label(),
            self.label(&self.size)
        )
    }

    fn label(&self, category: &str) -> String {
        if self.per_game {
            format!("{category}PG")
        } else {
            category.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerRecord;

    fn sample() -> PlayerCollection {
        let mut collection = PlayerCollection::new();
        for (name, goals, assists, shots) in [("A", "10", "5", "40"), ("B", "20", "10", "80"), ("C", "0", "1", "60")] {
            collection
                .add(PlayerRecord::from_pairs([
                    ("Name", format!("x{name}")),
                    ("GP", "10".to_string()),
                    ("G", goals.to_string()),
                    ("A", assists.to_string()),
                    ("SOG", shots.to_string()),
                ]))
                .unwrap();
        }
        collection
    }

    #[test]
    fn test_points_are_lazy_and_complete() {
        let collection = sample();
        let projection = ScatterProjection::new(&collection, "G", "A", "SOG", false).unwrap();

        let points: Vec<_> = projection.points().collect::<StatsResult<_>>().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(
            points[1],
            ScatterPoint {
                identity: "B".to_string(),
                x: 20.0,
                y: 10.0,
                size: 80.0
            }
        );

        // Restartable
        assert_eq!(projection.points().count(), 3);
    }

    #[test]
    fn test_bubble_size_scales_over_range() {
        let collection = sample();
        let projection = ScatterProjection::new(&collection, "G", "A", "SOG", false).unwrap();

        assert_eq!(projection.size_range().range, 40.0);
        assert_eq!(projection.bubble_size(40.0).unwrap(), DOT_SIZE);
        assert_eq!(projection.bubble_size(80.0).unwrap(), DOT_SIZE * 6.0);
        assert_eq!(projection.bubble_size(60.0).unwrap(), DOT_SIZE * 3.5);
    }

    #[test]
    fn test_flat_size_category() {
        let collection = sample();
        let projection = ScatterProjection::new(&collection, "G", "A", "GP", false).unwrap();
        assert!(matches!(
            projection.bubble_size(10.0),
            Err(StatsError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_labels() {
        let collection = sample();
        let per_game = ScatterProjection::new(&collection, "G", "A", "SOG", true).unwrap();
        assert_eq!(per_game.x_label(), "GPG");
        assert_eq!(per_game.title(), "X-GPG, Y-APG, Bubble Size-SOGPG");

        let totals = ScatterProjection::new(&collection, "G", "A", "SOG", false).unwrap();
        assert_eq!(totals.y_label(), "A");
    }

    #[test]
    fn test_empty_collection() {
        let empty = PlayerCollection::new();
        assert!(matches!(
            ScatterProjection::new(&empty, "G", "A", "SOG", false),
            Err(StatsError::EmptyCollection { .. })
        ));
    }
}
