//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! statistics pipeline, including TOML and environment variable loading and
//! validation.

use crate::config::filter::{default_filters, FilterConfig};
use crate::config::ranking::RankingConfig;
use crate::snapshot::ComparableCategories;
use crate::types::{RecordSchema, WeightedCategory};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub schema: RecordSchema,
    pub snapshots: SnapshotSettings,
    pub filters: Vec<FilterConfig>,
    pub ranking: RankingConfig,
    pub comparison: ComparisonSettings,
    pub scatter: ScatterSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where the two snapshots come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    /// Most recent export; the population that gets ranked
    pub later: Option<PathBuf>,
    /// Older export to compare against; comparison is skipped without it
    pub earlier: Option<PathBuf>,
    pub later_taken_on: Option<NaiveDate>,
    pub earlier_taken_on: Option<NaiveDate>,
    /// Field delimiter of both files
    pub delimiter: char,
}

/// Categories the snapshot comparison differences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonSettings {
    /// Declared categories; empty means detect numeric categories from the data
    pub categories: Vec<String>,
}

/// Categories plotted from the comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSettings {
    pub x: String,
    pub y: String,
    pub size: String,
    pub per_game: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceSettings::default(),
            schema: RecordSchema::default(),
            snapshots: SnapshotSettings::default(),
            filters: default_filters(),
            ranking: RankingConfig::default(),
            comparison: ComparisonSettings::default(),
            scatter: ScatterSettings::default(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "fantasy-stats".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            later: None,
            earlier: None,
            later_taken_on: None,
            earlier_taken_on: None,
            delimiter: ',',
        }
    }
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            x: "G".to_string(),
            y: "A".to_string(),
            size: "SOG".to_string(),
            per_game: false,
        }
    }
}

impl ComparisonSettings {
    pub fn comparable_categories(&self) -> ComparableCategories {
        if self.categories.is_empty() {
            ComparableCategories::Detect
        } else {
            ComparableCategories::Explicit(self.categories.clone())
        }
    }
}

impl SnapshotSettings {
    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                anyhow!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                )
            })
    }

    /// Days between the two snapshots, when both dates are known
    pub fn days_between(&self) -> Option<i64> {
        match (self.earlier_taken_on, self.later_taken_on) {
            (Some(earlier), Some(later)) => Some((later - earlier).num_days()),
            _ => None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("FANTASY_SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("FANTASY_LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Schema
        if let Ok(key) = env::var("FANTASY_IDENTITY_KEY") {
            config.schema.identity_key = key;
        }
        if let Ok(key) = env::var("FANTASY_GAMES_PLAYED_KEY") {
            config.schema.games_played_key = key;
        }
        if let Ok(len) = env::var("FANTASY_IDENTITY_PREFIX_LEN") {
            config.schema.identity_prefix_len = len
                .parse()
                .map_err(|_| anyhow!("Invalid FANTASY_IDENTITY_PREFIX_LEN value: {}", len))?;
        }

        // Snapshots
        if let Ok(path) = env::var("FANTASY_LATER_SNAPSHOT") {
            config.snapshots.later = Some(PathBuf::from(path));
        }
        if let Ok(path) = env::var("FANTASY_EARLIER_SNAPSHOT") {
            config.snapshots.earlier = Some(PathBuf::from(path));
        }
        if let Ok(date) = env::var("FANTASY_LATER_TAKEN_ON") {
            config.snapshots.later_taken_on = Some(
                date.parse()
                    .map_err(|_| anyhow!("Invalid FANTASY_LATER_TAKEN_ON value: {}", date))?,
            );
        }
        if let Ok(date) = env::var("FANTASY_EARLIER_TAKEN_ON") {
            config.snapshots.earlier_taken_on = Some(
                date.parse()
                    .map_err(|_| anyhow!("Invalid FANTASY_EARLIER_TAKEN_ON value: {}", date))?,
            );
        }
        if let Ok(delimiter) = env::var("FANTASY_DELIMITER") {
            let mut chars = delimiter.chars();
            config.snapshots.delimiter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(anyhow!("Invalid FANTASY_DELIMITER value: {}", delimiter)),
            };
        }

        // Ranking
        if let Ok(per_game) = env::var("FANTASY_RANK_PER_GAME") {
            config.ranking.per_game = per_game
                .parse()
                .map_err(|_| anyhow!("Invalid FANTASY_RANK_PER_GAME value: {}", per_game))?;
        }
        if let Ok(categories) = env::var("FANTASY_RANK_CATEGORIES") {
            config.ranking.categories = categories
                .split(',')
                .map(|c| c.parse::<WeightedCategory>().map_err(|e| anyhow!(e)))
                .collect::<Result<_>>()
                .context("Invalid FANTASY_RANK_CATEGORIES value")?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate schema
    if config.schema.identity_key.is_empty() {
        return Err(anyhow!("Identity key cannot be empty"));
    }
    if config.schema.games_played_key.is_empty() {
        return Err(anyhow!("Games played key cannot be empty"));
    }

    // Validate snapshots
    config.snapshots.delimiter_byte()?;
    if let Some(days) = config.snapshots.days_between() {
        if days <= 0 {
            return Err(anyhow!(
                "Later snapshot must be taken after the earlier one ({} days apart)",
                days
            ));
        }
    }

    // Validate filters
    for filter in &config.filters {
        if filter.category.is_empty() {
            return Err(anyhow!("Filter category cannot be empty"));
        }
        if !filter.threshold.is_finite() {
            return Err(anyhow!("Filter threshold for {} must be finite", filter.category));
        }
    }

    // Validate ranking
    if config.ranking.categories.is_empty() {
        return Err(anyhow!("Ranking needs at least one category"));
    }
    for category in &config.ranking.categories {
        if category.name.is_empty() {
            return Err(anyhow!("Ranking category name cannot be empty"));
        }
        if !category.weight.is_finite() {
            return Err(anyhow!("Weight for {} must be finite", category.name));
        }
    }

    // Validate scatter
    if [&config.scatter.x, &config.scatter.y, &config.scatter.size]
        .iter()
        .any(|c| c.is_empty())
    {
        return Err(anyhow!("Scatter categories cannot be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::filter::FilterTarget;
    use crate::types::Comparison;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        validate_config(&config).unwrap();

        assert_eq!(config.schema.identity_key, "Name");
        assert_eq!(config.filters.len(), 2);
        assert_eq!(config.ranking.categories.len(), 6);
        assert!(config.ranking.per_game);
        assert_eq!(
            config.comparison.comparable_categories(),
            ComparableCategories::Detect
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[service]
log_level = "debug"

[schema]
identity_prefix_len = 0

[snapshots]
later = "STATS20170115.csv"
earlier = "STATS20161120.csv"
later_taken_on = "2017-01-15"
earlier_taken_on = "2016-11-20"

[[filters]]
category = "GP"
comparison = ">"
threshold = 10

[ranking]
per_game = false
categories = [{{ name = "G", weight = 2.0 }}, {{ name = "PIM", weight = -0.5 }}]

[comparison]
categories = ["G", "A"]
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "fantasy-stats");
        assert_eq!(config.schema.identity_prefix_len, 0);
        assert_eq!(config.schema.games_played_key, "GP");
        assert_eq!(config.snapshots.days_between(), Some(56));
        assert_eq!(config.filters.len(), 1);
        assert_eq!(config.filters[0].comparison, Comparison::GreaterThan);
        assert_eq!(config.filters[0].applies_to, FilterTarget::Both);
        assert_eq!(
            config.ranking.categories,
            vec![WeightedCategory::new("G", 2.0), WeightedCategory::new("PIM", -0.5)]
        );
        assert!(!config.ranking.per_game);
        assert_eq!(
            config.comparison.comparable_categories(),
            ComparableCategories::Explicit(vec!["G".to_string(), "A".to_string()])
        );
        assert_eq!(config.scatter.size, "SOG");
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[ranking\nper_game = ").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_delimiter_byte() {
        let mut snapshots = SnapshotSettings::default();
        assert_eq!(snapshots.delimiter_byte().unwrap(), b',');

        snapshots.delimiter = ';';
        assert_eq!(snapshots.delimiter_byte().unwrap(), b';');

        // Would truncate to a tab
        snapshots.delimiter = '\u{109}';
        assert!(snapshots.delimiter_byte().is_err());

        // Latin-1 range fits in a byte but is not ASCII
        snapshots.delimiter = '\u{a6}';
        assert!(snapshots.delimiter_byte().is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.ranking.categories.clear();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.ranking.categories.push(WeightedCategory::new("G", f64::NAN));
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.snapshots.delimiter = '¦';
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.snapshots.later_taken_on = NaiveDate::from_ymd_opt(2016, 11, 20);
        config.snapshots.earlier_taken_on = NaiveDate::from_ymd_opt(2017, 1, 15);
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.filters[0].threshold = f64::INFINITY;
        assert!(validate_config(&config).is_err());
    }
}
