use crate::config::{OutputSpec, RankingSpec};
use crate::metrics::Metric;
use crate::ranking::Direction;
use serde::{Deserialize, Serialize};

/// Metrics mentioned in a summary blurb, in the order they are mentioned.
const SUMMARY_METRICS: [Metric; 3] = [Metric::Population, Metric::Income, Metric::Affordability];

/// Metrics described by a national blurb, one sentence each.
const NATIONAL_METRICS: [Metric; 4] = [Metric::Population, Metric::Income, Metric::SalePrice, Metric::Affordability];

/// How a rank is written inside a blurb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankStyle {
    /// `#3`
    #[default]
    Number,

    /// `3rd`
    Ordinal,
}

impl RankStyle {
    #[must_use]
    pub fn render(self, rank: u32) -> String {
        match self {
            Self::Number => format!("#{rank}"),
            Self::Ordinal => ordinal(rank),
        }
    }
}

/// The sentence structure of a blurb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurbStyle {
    /// One sentence: "Texas ranks #2 in population, #2 in median household income, and #1 in housing affordability."
    #[default]
    Summary,

    /// One sentence per ranked metric, placing the state within the nation
    National,
}

/// Write a rank as an English ordinal: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`.
#[must_use]
pub fn ordinal(rank: u32) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };

    format!("{rank}{suffix}")
}

/// Writes the blurb of each state according to the output and ranking settings.
#[derive(Debug, Clone, Copy)]
pub struct Blurbs<'a> {
    output: &'a OutputSpec,
    ranking: &'a RankingSpec,
    latest_period: Option<&'a str>,
}

impl<'a> Blurbs<'a> {
    #[must_use]
    pub const fn new(output: &'a OutputSpec, ranking: &'a RankingSpec, latest_period: Option<&'a str>) -> Self {
        Self {
            output,
            ranking,
            latest_period,
        }
    }

    /// The newest sale price period, quoted by national blurbs.
    #[must_use]
    pub const fn latest_period(&self) -> Option<&'a str> {
        self.latest_period
    }

    /// Describe a state's standing.
    ///
    /// `rank_of` yields the state's rank on a metric. Wording for metrics without a rank is
    /// left out, and a state with no ranks at all gets an empty blurb.
    pub fn describe(&self, name: &str, rank_of: impl Fn(Metric) -> Option<u32>) -> String {
        match self.output.blurb_style {
            BlurbStyle::Summary => self.summary(name, rank_of),
            BlurbStyle::National => self.national(name, rank_of),
        }
    }

    fn summary(&self, name: &str, rank_of: impl Fn(Metric) -> Option<u32>) -> String {
        let clauses: Vec<String> = SUMMARY_METRICS
            .iter()
            .filter_map(|&metric| {
                rank_of(metric).map(|rank| format!("{} in {}", self.output.rank_style.render(rank), metric.rank_phrase()))
            })
            .collect();

        let joined = match clauses.as_slice() {
            [] => return String::new(),
            [single] => single.clone(),
            [first, second] => format!("{first} and {second}"),
            [all_but_last @ .., last] => format!("{}, and {last}", all_but_last.join(", ")),
        };

        format!("{name} ranks {joined}.")
    }

    fn national(&self, name: &str, rank_of: impl Fn(Metric) -> Option<u32>) -> String {
        let scope = &self.output.blurb_scope;

        NATIONAL_METRICS
            .iter()
            .filter_map(|&metric| {
                let rank = self.output.rank_style.render(rank_of(metric)?);
                let extreme = superlative(self.ranking.get(metric).direction);

                Some(match metric {
                    Metric::Population | Metric::Income => {
                        format!("{name} is {rank} in the nation in {} among {scope}.", metric.rank_phrase())
                    }
                    Metric::SalePrice => format!(
                        "{name} has the {rank} {extreme} median sale price on homes in the nation among {scope}{}.",
                        self.period_clause()
                    ),
                    Metric::Affordability => format!(
                        "{name} has the {rank} {extreme} house affordability ratio in the nation among {scope}{}.",
                        self.period_clause()
                    ),
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn period_clause(&self) -> String {
        match (self.latest_period, self.output.price_source.trim()) {
            (None, _) => String::new(),
            (Some(period), "") => format!(", according to data from {period}"),
            (Some(period), source) => format!(", according to {source} data from {period}"),
        }
    }
}

/// The value that earns rank 1 under a direction.
const fn superlative(direction: Direction) -> &'static str {
    match direction {
        Direction::HighIsBest => "highest",
        Direction::LowIsBest => "lowest",
    }
}
