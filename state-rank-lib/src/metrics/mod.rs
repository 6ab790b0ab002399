//! Values flowing between the extractors, the rank engine, and the reports
//!
//! # Implementation Model
//!
//! Every per-state quantity is keyed by a [`StateKey`], the canonical identifier handed
//! out by the key registry. A [`MetricSeries`] holds one numeric value per state for a
//! single [`Metric`]; states absent from a source are simply not in the series, so
//! absence never masquerades as zero. A [`RankTable`] holds the 1-based rank of every
//! state that had a value.

mod metric;
mod metric_series;
mod rank_table;
mod state_key;

pub use metric::Metric;
pub use metric_series::MetricSeries;
pub use rank_table::RankTable;
pub use state_key::{StateKey, normalize_label};
