//! A keyed set of player records and the aggregates computed over it

use crate::error::{StatsError, StatsResult};
use crate::player::record::PlayerRecord;
use crate::types::{Attributes, Comparison, PlayerId, RecordSchema, StatRange};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Player records keyed by identity
///
/// Inserting a record under an identity that is already present replaces the
/// stored record in place, so iteration follows first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct PlayerCollection {
    records: Vec<PlayerRecord>,
    index: HashMap<PlayerId, usize>,
    schema: Arc<RecordSchema>,
}

impl PlayerCollection {
    /// Create an empty collection using the default schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection whose rows will be read through `schema`
    pub fn with_schema(schema: Arc<RecordSchema>) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            schema,
        }
    }

    /// Build a collection from an ordered sequence of attribute maps
    pub fn from_rows(
        rows: impl IntoIterator<Item = Attributes>,
        schema: Arc<RecordSchema>,
    ) -> StatsResult<Self> {
        let mut collection = Self::with_schema(schema);
        for row in rows {
            let record = PlayerRecord::new(row, collection.schema.clone());
            collection.add(record)?;
        }
        Ok(collection)
    }

    /// Insert a record, replacing any record with the same identity
    pub fn add(&mut self, record: PlayerRecord) -> StatsResult<()> {
        let identity = record.get_identity()?;
        match self.index.get(&identity) {
            Some(&slot) => self.records[slot] = record,
            None => {
                self.index.insert(identity, self.records.len());
                self.records.push(record);
            }
        }
        Ok(())
    }

    pub fn get(&self, identity: &str) -> Option<&PlayerRecord> {
        self.index.get(identity).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.index.contains_key(identity)
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of every record in insertion order
    pub fn all(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Min, max, mean and spread of `category` across every record
    pub fn stat_range(&self, category: &str, per_game: bool) -> StatsResult<StatRange> {
        let mut values = self
            .records
            .iter()
            .map(|record| record.get_stat(category, per_game));

        let first = match values.next() {
            Some(value) => value?,
            None => {
                return Err(StatsError::EmptyCollection {
                    category: category.to_string(),
                })
            }
        };

        let (mut min, mut max, mut sum) = (first, first, first);
        for value in values {
            let value = value?;
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }

        Ok(StatRange {
            min,
            max,
            average: sum / self.records.len() as f64,
            range: (max - min).abs(),
        })
    }

    /// New collection holding the records whose `category` passes `comparison` against `threshold`
    ///
    /// The source collection is left untouched.
    pub fn filter(
        &self,
        category: &str,
        per_game: bool,
        comparison: Comparison,
        threshold: f64,
    ) -> StatsResult<PlayerCollection> {
        let mut filtered = Self::with_schema(self.schema.clone());
        for record in &self.records {
            if comparison.holds(record.get_stat(category, per_game)?, threshold) {
                filtered.add(record.clone())?;
            }
        }

        debug!(
            "Filter {}{} {} {}: {} of {} players kept",
            category,
            if per_game { " per game" } else { "" },
            comparison,
            threshold,
            filtered.size(),
            self.size()
        );

        Ok(filtered)
    }
}

impl std::fmt::Display for PlayerCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Collection of {} players", self.records.len())
    }
}
