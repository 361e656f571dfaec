//! Configuration management for the statistics pipeline
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and the defaults that reproduce the standard
//! season-over-season report.

pub mod app;
pub mod filter;
pub mod ranking;

// Re-export commonly used types
pub use app::{
    validate_config, AppConfig, ComparisonSettings, ScatterSettings, ServiceSettings,
    SnapshotSettings,
};
pub use filter::{FilterConfig, FilterTarget};
pub use ranking::RankingConfig;
