use super::rank;
use crate::config::MetricRanking;
use crate::metrics::{Metric, MetricSeries, RankTable, StateKey};

/// A metric series together with the ranks derived from it.
#[derive(Debug, Clone, Default)]
pub struct RankedMetric {
    pub series: MetricSeries,
    pub ranks: RankTable,
}

impl RankedMetric {
    #[must_use]
    pub fn new(series: MetricSeries, policy: &MetricRanking) -> Self {
        let ranks = rank(&series, policy.direction, policy.ties);
        Self { series, ranks }
    }

    #[must_use]
    pub fn value(&self, key: &StateKey) -> Option<f64> {
        self.series.get(key)
    }

    #[must_use]
    pub fn rank(&self, key: &StateKey) -> Option<u32> {
        self.ranks.get(key)
    }
}

/// Every ranked metric for one run.
#[derive(Debug, Clone, Default)]
pub struct RankedMetrics {
    pub population: RankedMetric,
    pub income: RankedMetric,
    pub sale_price: RankedMetric,
    pub affordability: RankedMetric,
}

impl RankedMetrics {
    #[must_use]
    pub const fn get(&self, metric: Metric) -> &RankedMetric {
        match metric {
            Metric::Population => &self.population,
            Metric::Income => &self.income,
            Metric::SalePrice => &self.sale_price,
            Metric::Affordability => &self.affordability,
        }
    }
}
