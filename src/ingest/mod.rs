//! Snapshot ingestion from delimited stat exports
//!
//! The header row names the categories; every following row becomes one
//! player record.

pub mod csv_reader;

// Re-export commonly used functions
pub use csv_reader::{load_collection, read_collection};
