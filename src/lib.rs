//! Fantasy Stats - statistics engine for fantasy league player snapshots
//!
//! This crate loads per-player stat exports, computes stat ranges and
//! filtered subsets, derives per-game deltas between two snapshots, and
//! ranks players by a weighted, min-max normalized composite score.

pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod player;
pub mod projection;
pub mod ranking;
pub mod snapshot;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, StatsError, StatsResult};
pub use types::*;

// Re-export key components
pub use pipeline::{AnalysisPipeline, PipelineOutput};
pub use player::{PlayerCollection, PlayerRecord};
pub use projection::{ScatterPoint, ScatterProjection};
pub use ranking::{MinMaxRankingEngine, RankingEngine, RankingTable};
pub use snapshot::{ComparableCategories, PerGameDeltaComparator, SnapshotComparator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
