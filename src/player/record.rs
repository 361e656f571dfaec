//! A single player's raw statistics row

use crate::error::{StatsError, StatsResult};
use crate::types::{Attributes, PlayerId, RecordSchema};
use crate::utils::{parse_stat, strip_leading_chars};
use serde::Serialize;
use std::sync::Arc;

/// One player's attribute map, read through a [`RecordSchema`]
///
/// Records are immutable: replacing a player in a collection means building
/// a new record. Derived values are computed on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    attributes: Attributes,
    #[serde(skip)]
    schema: Arc<RecordSchema>,
}

impl PlayerRecord {
    pub fn new(attributes: Attributes, schema: Arc<RecordSchema>) -> Self {
        Self { attributes, schema }
    }

    /// Build a record from `(category, value)` pairs using the default schema
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(attributes, Arc::new(RecordSchema::default()))
    }

    /// Player name with the source's leading artifact character removed
    pub fn get_identity(&self) -> StatsResult<PlayerId> {
        let raw = self.raw_identity()?;
        Ok(strip_leading_chars(raw, self.schema.identity_prefix_len).to_string())
    }

    /// Identity exactly as stored, artifact included
    pub fn raw_identity(&self) -> StatsResult<&str> {
        self.raw(&self.schema.identity_key)
            .ok_or_else(|| StatsError::missing(&self.schema.identity_key))
    }

    /// Numeric value of `category`, divided by games played when `per_game` is set
    ///
    /// A player with zero games played reads as 0 in per-game mode.
    pub fn get_stat(&self, category: &str, per_game: bool) -> StatsResult<f64> {
        let raw = self
            .raw(category)
            .ok_or_else(|| StatsError::missing(category))?;
        let value = parse_stat(category, raw)?;

        if !per_game {
            return Ok(value);
        }

        let games = self.games_played()?;
        if games == 0.0 {
            Ok(0.0)
        } else {
            Ok(value / games)
        }
    }

    pub fn games_played(&self) -> StatsResult<f64> {
        let key = &self.schema.games_played_key;
        let raw = self.raw(key).ok_or_else(|| StatsError::missing(key))?;
        parse_stat(key, raw)
    }

    pub fn raw(&self, category: &str) -> Option<&str> {
        self.attributes.get(category).map(String::as_str)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }
}
