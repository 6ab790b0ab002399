use crate::metrics::{MetricSeries, RankTable, StateKey};
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which end of a metric's range earns rank 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The largest value is ranked first
    #[default]
    HighIsBest,

    /// The smallest value is ranked first
    LowIsBest,
}

impl Direction {
    fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Self::HighIsBest => b.total_cmp(&a),
            Self::LowIsBest => a.total_cmp(&b),
        }
    }
}

/// How equal values share ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Ties share a rank and the next distinct value takes the following rank: `[100, 100, 90]` ranks `[1, 1, 2]`
    #[default]
    Dense,

    /// Ties share a rank and the next distinct value skips past them: `[100, 100, 90]` ranks `[1, 1, 3]`
    Competition,
}

/// Rank every state present in `series`.
///
/// States missing from the series get no entry in the result.
#[must_use]
pub fn rank(series: &MetricSeries, direction: Direction, ties: TiePolicy) -> RankTable {
    // adding zero folds -0.0 into 0.0 so the two compare as a tie
    let mut entries: Vec<(&StateKey, f64)> = series.iter().map(|(key, value)| (key, value + 0.0)).collect();

    // key order keeps the walk deterministic among ties
    entries.sort_by(|a, b| direction.compare(a.1, b.1).then_with(|| a.0.cmp(b.0)));

    let mut ranks = HashMap::with_capacity(entries.len());
    let mut previous: Option<f64> = None;
    let mut current = 0;

    for (position, (key, value)) in (1_u32..).zip(entries) {
        if previous.is_none_or(|p| p.total_cmp(&value) != Ordering::Equal) {
            current = match ties {
                TiePolicy::Dense => current + 1,
                TiePolicy::Competition => position,
            };
            previous = Some(value);
        }

        let _ = ranks.insert(key.clone(), current);
    }

    RankTable::from_map(ranks)
}
