//! End-to-end computation of the state table from already-read sources.

use crate::config::Config;
use crate::error::PipelineError;
use crate::metrics::{Metric, MetricSeries};
use crate::ranking::{RankedMetric, RankedMetrics, affordability};
use crate::reports::{Blurbs, OutputTable, assemble};
use crate::sources::{Extraction, KeyRegistry, RawTable, extract};

const LOG_TARGET: &str = "  pipeline";

/// The four sources of one run, fully read into memory.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub keys: RawTable,
    pub population: RawTable,
    pub income: RawTable,
    pub sale_price: RawTable,
}

impl SourceTables {
    /// The table backing a sourced metric, or `None` for a derived one.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> Option<&RawTable> {
        match metric {
            Metric::Population => Some(&self.population),
            Metric::Income => Some(&self.income),
            Metric::SalePrice => Some(&self.sale_price),
            Metric::Affordability => None,
        }
    }
}

/// Join, rank, and assemble the output table.
///
/// # Errors
///
/// Returns the first fatal [`PipelineError`] raised while building the key registry or
/// extracting a metric. Nothing is produced in that case.
pub fn execute(config: &Config, tables: &SourceTables) -> Result<OutputTable, PipelineError> {
    let registry = KeyRegistry::load(&tables.keys, &config.keys)?;

    let extract_sourced = |metric: Metric| match (tables.get(metric), config.sources.get(metric)) {
        (Some(table), Some(spec)) => extract(metric, table, spec, &registry),
        _ => Ok(Extraction::default()),
    };

    let mut population = extract_sourced(Metric::Population)?;
    let income = extract_sourced(Metric::Income)?;
    let sale_price = extract_sourced(Metric::SalePrice)?;

    // populations are whole head counts, ranked as printed
    population.series = population.series.iter().map(|(key, value)| (key.clone(), value.round())).collect::<MetricSeries>();

    let latest_period = sale_price.latest_period.clone();
    if let Some(period) = &latest_period {
        log::info!(target: LOG_TARGET, "Using {period} as the most recent period for median sale prices");
    }

    let ratios = affordability(&income.series, &sale_price.series, config.affordability.formula);
    log::info!(target: LOG_TARGET, "Computed affordability for {} of {} states", ratios.len(), registry.len());

    let ranked = RankedMetrics {
        population: ranked(population, Metric::Population, config),
        income: ranked(income, Metric::Income, config),
        sale_price: ranked(sale_price, Metric::SalePrice, config),
        affordability: RankedMetric::new(ratios, config.ranking.get(Metric::Affordability)),
    };

    let blurbs = Blurbs::new(&config.output, &config.ranking, latest_period.as_deref());
    Ok(assemble(&registry, &ranked, &blurbs))
}

fn ranked(extraction: Extraction, metric: Metric, config: &Config) -> RankedMetric {
    RankedMetric::new(extraction.series, config.ranking.get(metric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Layout, SourceSpec};
    use crate::ranking::{Direction, RatioFormula};
    use crate::reports::{BlurbStyle, RankStyle};

    fn table(text: &str) -> RawTable {
        RawTable::from_reader(text.as_bytes(), b',', 0, "test").unwrap()
    }

    fn column_source(value_column: &str) -> SourceSpec {
        SourceSpec {
            path: "source.csv".into(),
            delimiter: ',',
            header_row: 0,
            layout: Layout::Column {
                key_column: "state".to_string(),
                value_column: value_column.to_string(),
            },
            missing_markers: Vec::new(),
            fallback: std::collections::BTreeMap::new(),
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.keys.key_column = "key".to_string();
        config.keys.name_column = Some("name".to_string());
        config.keys.alias_columns.clear();
        config.keys.exclude.clear();
        config.sources.population = column_source("population");
        config.sources.income = column_source("income");
        config.sources.sale_price = SourceSpec {
            layout: Layout::LatestNonEmpty {
                key_column: "state".to_string(),
            },
            ..column_source("unused")
        };
        config
    }

    fn tables() -> SourceTables {
        SourceTables {
            keys: table("key,name\nCA,California\nTX,Texas\nWY,Wyoming\n"),
            population: table("state,population\nCA,39000000\nTX,30000000\nWY,580000\nAtlantis,7\n"),
            income: table("state,income\nCA,85000\nTX,67000\n"),
            sale_price: table("state,Jan,Feb,Mar\nCA,640000,650000,\nTX,330000,,\nWY,,,\n"),
        }
    }

    #[test]
    fn test_execute_joins_and_ranks() {
        let output = execute(&config(), &tables()).unwrap();

        assert_eq!(output.records.len(), 3);
        let names: Vec<_> = output.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["California", "Texas", "Wyoming"]);

        let ca = &output.records[0];
        let tx = &output.records[1];
        let wy = &output.records[2];

        assert_eq!(ca.population_rank, Some(1));
        assert_eq!(tx.population_rank, Some(2));
        assert_eq!(wy.population_rank, Some(3));

        assert_eq!(ca.sale_price, Some(650_000.0));
        assert_eq!(tx.sale_price, Some(330_000.0));
        assert_eq!(wy.sale_price, None);

        assert!((ca.affordability.unwrap() - 0.1308).abs() < 1e-4);
        assert!((tx.affordability.unwrap() - 0.2030).abs() < 1e-4);
        assert_eq!(tx.affordability_rank, Some(1));
        assert_eq!(ca.affordability_rank, Some(2));

        assert_eq!(wy.income, None);
        assert_eq!(wy.affordability, None);
        assert_eq!(wy.affordability_rank, None);
        assert_eq!(wy.blurb, "Wyoming ranks #3 in population.");

        assert_eq!(output.latest_period.as_deref(), Some("Mar"));
    }

    #[test]
    fn test_execute_with_inverted_ratio() {
        let mut config = config();
        config.affordability.formula = RatioFormula::PriceOverIncome;
        config.ranking.affordability.direction = Direction::LowIsBest;

        let output = execute(&config, &tables()).unwrap();
        assert_eq!(output.records[1].affordability_rank, Some(1));
        assert_eq!(output.records[0].affordability_rank, Some(2));
    }

    #[test]
    fn test_execute_fails_on_malformed_value() {
        let mut tables = tables();
        tables.income = table("state,income\nCA,lots\n");

        let result = execute(&config(), &tables);
        assert!(matches!(result, Err(PipelineError::MalformedMetric { .. })));
    }

    #[test]
    fn test_execute_fails_without_keys() {
        let mut tables = tables();
        tables.keys = table("key,name\n");

        let result = execute(&config(), &tables);
        assert!(matches!(result, Err(PipelineError::MissingKeyData { .. })));
    }

    #[test]
    fn test_fractional_populations_rank_as_printed() {
        let mut tables = tables();
        tables.population = table("state,population\nCA,100.4\nTX,100\nWY,99.6\n");

        let output = execute(&config(), &tables).unwrap();
        let populations: Vec<_> = output.records.iter().map(|r| (r.population, r.population_rank)).collect();
        assert_eq!(populations, [(Some(100), Some(1)), (Some(100), Some(1)), (Some(100), Some(1))]);
    }

    #[test]
    fn test_execute_with_national_blurbs() {
        let mut config = config();
        config.output.rank_style = RankStyle::Ordinal;
        config.output.blurb_style = BlurbStyle::National;

        let output = execute(&config, &tables()).unwrap();
        assert_eq!(
            output.records[2].blurb,
            "Wyoming is 3rd in the nation in population among states, DC, and Puerto Rico."
        );
        assert!(output.records[1].blurb.contains("Texas has the 2nd highest median sale price on homes in the nation among states, DC, and Puerto Rico, according to Redfin data from Mar."));
        assert!(output.records[1].blurb.ends_with("Texas has the 1st highest house affordability ratio in the nation among states, DC, and Puerto Rico, according to Redfin data from Mar."));
    }

    #[test]
    fn test_source_tables_get() {
        let tables = tables();
        assert!(tables.get(Metric::Affordability).is_none());
        assert_eq!(tables.get(Metric::Income), Some(&tables.income));
    }
}
