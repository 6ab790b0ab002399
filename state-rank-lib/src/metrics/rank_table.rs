use super::StateKey;
use std::collections::HashMap;

/// The 1-based rank of every state that had a value for a metric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankTable {
    ranks: HashMap<StateKey, u32>,
}

impl RankTable {
    #[must_use]
    pub const fn from_map(ranks: HashMap<StateKey, u32>) -> Self {
        Self { ranks }
    }

    #[must_use]
    pub fn get(&self, key: &StateKey) -> Option<u32> {
        self.ranks.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// The largest rank handed out, if any state was ranked.
    #[must_use]
    pub fn max_rank(&self) -> Option<u32> {
        self.ranks.values().copied().max()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, u32)> {
        self.ranks.iter().map(|(key, rank)| (key, *rank))
    }
}
