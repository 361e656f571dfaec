//! Load, filter, compare and rank as one explicit sequence of stages
//!
//! Every stage takes the previous stage's output as an argument; nothing is
//! kept between runs.

use crate::config::{AppConfig, FilterConfig};
use crate::error::{Result, StatsResult};
use crate::ingest::load_collection;
use crate::player::PlayerCollection;
use crate::projection::ScatterProjection;
use crate::ranking::{MinMaxRankingEngine, RankingEngine, RankingTable};
use crate::snapshot::{PerGameDeltaComparator, SnapshotComparator};
use crate::types::RecordSchema;
use anyhow::{anyhow, Context};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Later snapshot after its filters
    pub later: PlayerCollection,
    /// Earlier snapshot after its filters, when one was supplied
    pub earlier: Option<PlayerCollection>,
    /// Per-game deltas of players present in both filtered snapshots
    pub comparison: Option<PlayerCollection>,
    /// Ranking of the filtered later snapshot
    pub rankings: RankingTable,
}

/// Configured analysis pipeline
pub struct AnalysisPipeline {
    config: AppConfig,
    schema: Arc<RecordSchema>,
    comparator: Box<dyn SnapshotComparator>,
    engine: Box<dyn RankingEngine>,
}

impl AnalysisPipeline {
    pub fn new(config: AppConfig) -> Self {
        let schema = Arc::new(config.schema.clone());
        let comparator = Box::new(PerGameDeltaComparator::new(
            config.comparison.comparable_categories(),
        ));
        Self {
            config,
            schema,
            comparator,
            engine: Box::new(MinMaxRankingEngine::new()),
        }
    }

    /// Replace the ranking engine
    pub fn with_engine(mut self, engine: impl RankingEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Replace the snapshot comparator
    pub fn with_comparator(mut self, comparator: impl SnapshotComparator + 'static) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Read the configured snapshot files
    pub fn load_snapshots(&self) -> Result<(PlayerCollection, Option<PlayerCollection>)> {
        let snapshots = &self.config.snapshots;
        let delimiter = snapshots.delimiter_byte()?;

        let later_path = snapshots
            .later
            .as_ref()
            .ok_or_else(|| anyhow!("No later snapshot configured"))?;
        let later = load_collection(later_path, self.schema.clone(), delimiter)?;
        info!("Loaded later snapshot: {}", later);

        let earlier = match &snapshots.earlier {
            Some(path) => {
                let earlier = load_collection(path, self.schema.clone(), delimiter)?;
                info!("Loaded earlier snapshot: {}", earlier);
                Some(earlier)
            }
            None => None,
        };

        if let Some(days) = snapshots.days_between() {
            info!("Snapshots are {} days apart", days);
        }

        Ok((later, earlier))
    }

    /// Load the configured files and run every stage
    pub fn run(&self) -> Result<PipelineOutput> {
        let (later, earlier) = self.load_snapshots()?;
        self.run_with(later, earlier)
    }

    /// Run every stage on snapshots that are already loaded
    pub fn run_with(
        &self,
        later: PlayerCollection,
        earlier: Option<PlayerCollection>,
    ) -> Result<PipelineOutput> {
        let unfiltered_later = later;
        let later = self.filter_later(&unfiltered_later)?;
        let earlier = earlier
            .map(|earlier| self.filter_earlier(&earlier))
            .transpose()?;

        let comparison = match &earlier {
            Some(earlier) => {
                let comparison = self
                    .comparator
                    .compare(&later, earlier)
                    .context("Snapshot comparison failed")?;
                info!("Compared snapshots: {} players in both", comparison.size());
                Some(comparison)
            }
            None => {
                debug!("No earlier snapshot, skipping comparison");
                None
            }
        };

        let ranking = &self.config.ranking;
        let bounds = if ranking.bounds_from_unfiltered {
            &unfiltered_later
        } else {
            &later
        };
        let rankings = self
            .engine
            .rank_within(bounds, &later, &ranking.categories, ranking.per_game)
            .context("Ranking failed")?;
        info!("Ranked {} players", rankings.len());

        Ok(PipelineOutput {
            later,
            earlier,
            comparison,
            rankings,
        })
    }

    /// Scatter view of the comparison using the configured categories
    pub fn scatter<'a>(
        &self,
        output: &'a PipelineOutput,
    ) -> Option<StatsResult<ScatterProjection<'a>>> {
        let scatter = &self.config.scatter;
        output.comparison.as_ref().map(|comparison| {
            ScatterProjection::new(
                comparison,
                scatter.x.as_str(),
                scatter.y.as_str(),
                scatter.size.as_str(),
                scatter.per_game,
            )
        })
    }

    fn filter_later(&self, collection: &PlayerCollection) -> Result<PlayerCollection> {
        self.apply_filters(collection, "later", |f| f.applies_to_later())
    }

    fn filter_earlier(&self, collection: &PlayerCollection) -> Result<PlayerCollection> {
        self.apply_filters(collection, "earlier", |f| f.applies_to_earlier())
    }

    fn apply_filters(
        &self,
        collection: &PlayerCollection,
        label: &str,
        applies: impl Fn(&FilterConfig) -> bool,
    ) -> Result<PlayerCollection> {
        let mut current = collection.clone();
        for filter in self.config.filters.iter().filter(|&filter| applies(filter)) {
            current = filter
                .apply(&current)
                .with_context(|| format!("Filter {} on {} snapshot failed", filter, label))?;
        }
        info!(
            "Filtered {} snapshot: {} of {} players kept",
            label,
            current.size(),
            collection.size()
        );
        Ok(current)
    }
}
