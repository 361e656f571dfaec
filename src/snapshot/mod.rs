//! Snapshot comparison
//!
//! Derives per-game deltas between two collections of the same population
//! taken at different points in the season.

pub mod comparator;

// Re-export commonly used types
pub use comparator::{compare, ComparableCategories, PerGameDeltaComparator, SnapshotComparator};
