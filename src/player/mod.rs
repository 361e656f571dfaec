//! Player data model
//!
//! This module holds the raw per-player record and the identity-keyed
//! collection that computes stat ranges and filtered subsets.

pub mod collection;
pub mod record;

// Re-export commonly used types
pub use collection::PlayerCollection;
pub use record::PlayerRecord;
