//! Ranking of metric series and the derived affordability metric
//!
//! # Implementation Model
//!
//! [`rank`] turns a [`MetricSeries`](crate::metrics::MetricSeries) into a
//! [`RankTable`](crate::metrics::RankTable). The ordering [`Direction`] and the
//! [`TiePolicy`] are chosen per metric through configuration rather than fixed in code.
//!
//! [`affordability`] combines the income and sale-price series into a ratio series,
//! which is then ranked like any other metric. A [`RankedMetric`] keeps a series and
//! its ranks together for the output assembler.

mod affordability;
mod rank_engine;
mod ranked_metric;

pub use affordability::{RatioFormula, affordability};
pub use rank_engine::{Direction, TiePolicy, rank};
pub use ranked_metric::{RankedMetric, RankedMetrics};
