//! Snapshot comparator trait and the per-game delta implementation

use crate::error::StatsResult;
use crate::player::{PlayerCollection, PlayerRecord};
use crate::types::Attributes;
use crate::utils::is_numeric;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which categories a comparison differences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparableCategories {
    /// A declared list of category names
    Explicit(Vec<String>),
    /// Every non-identity category whose value in the first record of the
    /// later snapshot reads as a number
    #[default]
    Detect,
}

impl ComparableCategories {
    /// Resolve the category list against the later snapshot
    pub fn resolve(&self, later: &PlayerCollection) -> Vec<String> {
        match self {
            ComparableCategories::Explicit(categories) => categories.clone(),
            ComparableCategories::Detect => {
                let Some(representative) = later.all().first() else {
                    return Vec::new();
                };
                let identity_key = &representative.schema().identity_key;
                representative
                    .attributes()
                    .iter()
                    .filter(|(category, value)| *category != identity_key && is_numeric(value))
                    .map(|(category, _)| category.clone())
                    .collect()
            }
        }
    }
}

/// Trait for deriving a change collection from two snapshots
pub trait SnapshotComparator: Send + Sync {
    /// Build a collection describing how each player in both snapshots changed
    ///
    /// Players present in only one snapshot are left out.
    fn compare(
        &self,
        later: &PlayerCollection,
        earlier: &PlayerCollection,
    ) -> StatsResult<PlayerCollection>;
}

/// Differences per-game rates between snapshots
///
/// Both sides are read per game because the snapshots cover different
/// numbers of games. The resulting records hold the deltas as plain values,
/// so they are meant to be read back with `per_game = false`.
#[derive(Debug, Clone, Default)]
pub struct PerGameDeltaComparator {
    categories: ComparableCategories,
}

impl PerGameDeltaComparator {
    pub fn new(categories: ComparableCategories) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &ComparableCategories {
        &self.categories
    }

    fn delta_record(
        later: &PlayerRecord,
        earlier: &PlayerRecord,
        categories: &[String],
    ) -> StatsResult<PlayerRecord> {
        let schema = later.schema().clone();
        let mut attributes = Attributes::new();

        for category in categories {
            let delta = later.get_stat(category, true)? - earlier.get_stat(category, true)?;
            attributes.insert(category.clone(), delta.to_string());
        }
        attributes.insert(
            schema.identity_key.clone(),
            later.raw_identity()?.to_string(),
        );

        Ok(PlayerRecord::new(attributes, schema))
    }
}

impl SnapshotComparator for PerGameDeltaComparator {
    fn compare(
        &self,
        later: &PlayerCollection,
        earlier: &PlayerCollection,
    ) -> StatsResult<PlayerCollection> {
        let categories = self.categories.resolve(later);
        let mut deltas = PlayerCollection::with_schema(later.schema().clone());

        for record in later.all() {
            let identity = record.get_identity()?;
            let Some(previous) = earlier.get(&identity) else {
                continue;
            };
            deltas.add(Self::delta_record(record, previous, &categories)?)?;
        }

        debug!(
            "Compared {} later against {} earlier players over {} categories: {} matched",
            later.size(),
            earlier.size(),
            categories.len(),
            deltas.size()
        );

        Ok(deltas)
    }
}

/// Compare two snapshots over every detected numeric category
pub fn compare(later: &PlayerCollection, earlier: &PlayerCollection) -> StatsResult<PlayerCollection> {
    PerGameDeltaComparator::default().compare(later, earlier)
}
