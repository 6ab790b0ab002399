use strum::{Display, EnumIter};

/// The metrics every state is ranked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    Population,
    Income,
    SalePrice,
    Affordability,
}

impl Metric {
    /// Whether the metric is read from its own source rather than derived.
    #[must_use]
    pub const fn is_sourced(self) -> bool {
        !matches!(self, Self::Affordability)
    }

    /// Phrase used when describing a state's rank on this metric.
    #[must_use]
    pub const fn rank_phrase(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::Income => "median household income",
            Self::SalePrice => "median sale price",
            Self::Affordability => "housing affordability",
        }
    }
}
