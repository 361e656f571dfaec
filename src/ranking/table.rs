//! Computed ranking with lookup by identity

use crate::types::{PlayerId, RankingEntry};
use serde::Serialize;
use std::collections::HashMap;

/// A finished ranking, ordered from the lowest composite score (rank 1) upward
///
/// The table is built once and can be iterated or searched any number of
/// times without recomputing scores.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RankingTable {
    entries: Vec<RankingEntry>,
    #[serde(skip)]
    index: HashMap<PlayerId, usize>,
}

impl RankingTable {
    /// Assign ranks 1..=N to `(identity, score)` pairs already sorted by ascending score
    pub(crate) fn from_sorted(scores: Vec<(PlayerId, f64)>) -> Self {
        let entries: Vec<RankingEntry> = scores
            .into_iter()
            .enumerate()
            .map(|(position, (identity, score))| RankingEntry {
                rank: position + 1,
                identity,
                score,
            })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| (entry.identity.clone(), slot))
            .collect();
        Self { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending score order
    pub fn iter(&self) -> std::slice::Iter<'_, RankingEntry> {
        self.entries.iter()
    }

    /// Entries from the highest composite score down
    pub fn leaderboard(&self) -> impl Iterator<Item = &RankingEntry> {
        self.entries.iter().rev()
    }

    /// The `n` highest-ranked entries, best first
    pub fn top(&self, n: usize) -> Vec<&RankingEntry> {
        self.leaderboard().take(n).collect()
    }

    pub fn find(&self, identity: &str) -> Option<&RankingEntry> {
        self.index.get(identity).map(|&slot| &self.entries[slot])
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a RankingTable {
    type Item = &'a RankingEntry;
    type IntoIter = std::slice::Iter<'a, RankingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
