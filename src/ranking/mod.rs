//! Weighted multi-category ranking
//!
//! This module reduces several weighted categories into a single composite
//! score per player using min-max normalization, and exposes the resulting
//! order as a reusable lookup table.

pub mod engine;
pub mod table;

// Re-export commonly used types
pub use engine::{MinMaxRankingEngine, RankingEngine};
pub use table::RankingTable;
