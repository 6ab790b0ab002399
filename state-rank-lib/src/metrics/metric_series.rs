use super::StateKey;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// One numeric value per state for a single metric.
///
/// A state without a value is absent from the series rather than stored as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSeries {
    values: HashMap<StateKey, f64>,
}

impl MetricSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a state.
    ///
    /// Returns `false` and leaves the series untouched if the state already has a value.
    pub fn insert(&mut self, key: StateKey, value: f64) -> bool {
        match self.values.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                let _ = entry.insert(value);
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &StateKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    #[must_use]
    pub fn contains(&self, key: &StateKey) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, f64)> {
        self.values.iter().map(|(key, value)| (key, *value))
    }
}

impl FromIterator<(StateKey, f64)> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = (StateKey, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (key, value) in iter {
            let _ = series.insert(key, value);
        }
        series
    }
}

impl<const N: usize> From<[(&str, f64); N]> for MetricSeries {
    fn from(entries: [(&str, f64); N]) -> Self {
        entries.into_iter().map(|(key, value)| (StateKey::new(key), value)).collect()
    }
}
