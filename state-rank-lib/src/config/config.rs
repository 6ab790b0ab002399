use super::{KeysSpec, Layout, SourceSpec};
use crate::Result;
use crate::metrics::Metric;
use crate::ranking::{Direction, RatioFormula, TiePolicy};
use crate::reports::{BlurbStyle, RankStyle};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use strum::IntoEnumIterator;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the data directory when no configuration path is given
pub const DEFAULT_CONFIG_FILE_NAME: &str = "state-rank.toml";

/// Upper bound on the number of decimals used to render the affordability ratio
const MAX_RATIO_DECIMALS: usize = 10;

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The source of state keys and display names
    pub keys: KeysSpec,

    /// One source per sourced metric
    pub sources: SourcesSpec,

    /// Ranking policy per metric
    #[serde(default)]
    pub ranking: RankingSpec,

    /// How the affordability ratio is derived
    #[serde(default)]
    pub affordability: AffordabilitySpec,

    /// How values are rendered in reports
    #[serde(default)]
    pub output: OutputSpec,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesSpec {
    pub population: SourceSpec,
    pub income: SourceSpec,
    pub sale_price: SourceSpec,
}

impl SourcesSpec {
    /// The source feeding a metric, or `None` for derived metrics.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> Option<&SourceSpec> {
        match metric {
            Metric::Population => Some(&self.population),
            Metric::Income => Some(&self.income),
            Metric::SalePrice => Some(&self.sale_price),
            Metric::Affordability => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricRanking {
    #[serde(default)]
    pub direction: Direction,

    #[serde(default)]
    pub ties: TiePolicy,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RankingSpec {
    #[serde(default)]
    pub population: MetricRanking,

    #[serde(default)]
    pub income: MetricRanking,

    #[serde(default)]
    pub sale_price: MetricRanking,

    #[serde(default)]
    pub affordability: MetricRanking,
}

impl RankingSpec {
    #[must_use]
    pub const fn get(&self, metric: Metric) -> &MetricRanking {
        match metric {
            Metric::Population => &self.population,
            Metric::Income => &self.income,
            Metric::SalePrice => &self.sale_price,
            Metric::Affordability => &self.affordability,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AffordabilitySpec {
    #[serde(default)]
    pub formula: RatioFormula,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSpec {
    /// Decimal places used for the affordability ratio
    #[serde(default = "default_ratio_decimals")]
    pub ratio_decimals: usize,

    /// Insert thousands separators in counts and currency values
    #[serde(default)]
    pub group_digits: bool,

    /// Prefix written before currency values, such as `$`
    #[serde(default)]
    pub currency_prefix: String,

    /// How ranks are written in blurbs
    #[serde(default)]
    pub rank_style: RankStyle,

    /// Sentence structure of the blurbs
    #[serde(default)]
    pub blurb_style: BlurbStyle,

    /// The set of places a national blurb ranks a state among
    #[serde(default = "default_blurb_scope")]
    pub blurb_scope: String,

    /// Name of the sale price data provider quoted in national blurbs
    #[serde(default = "default_price_source")]
    pub price_source: String,
}

const fn default_ratio_decimals() -> usize {
    4
}

fn default_blurb_scope() -> String {
    "states, DC, and Puerto Rico".to_string()
}

fn default_price_source() -> String {
    "Redfin".to_string()
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            ratio_decimals: default_ratio_decimals(),
            group_digits: false,
            currency_prefix: String::new(),
            rank_style: RankStyle::default(),
            blurb_style: BlurbStyle::default(),
            blurb_scope: default_blurb_scope(),
            price_source: default_price_source(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `state-rank.toml` in `data_dir` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it fails validation
    pub fn load(data_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading state-rank configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = data_dir.join(DEFAULT_CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading state-rank configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a delimiter is not a single ASCII character, a transposed layout
    /// does not select exactly one data row, a column name is blank, or the ratio precision is out of range
    pub fn validate(&self) -> Result<()> {
        if self.keys.delimiter_byte().is_none() {
            return Err(app_err!("keys.delimiter must be a single ASCII character, got {:?}", self.keys.delimiter));
        }

        if self.keys.key_column.trim().is_empty() {
            return Err(app_err!("keys.key_column must not be empty"));
        }

        for metric in Metric::iter().filter(|metric| metric.is_sourced()) {
            if let Some(source) = self.sources.get(metric) {
                validate_source(metric, source)?;
            }
        }

        if self.output.blurb_style == BlurbStyle::National && self.output.blurb_scope.trim().is_empty() {
            return Err(app_err!("output.blurb_scope must not be empty for national blurbs"));
        }

        if self.output.ratio_decimals > MAX_RATIO_DECIMALS {
            return Err(app_err!(
                "output.ratio_decimals must be at most {MAX_RATIO_DECIMALS}, got {}",
                self.output.ratio_decimals
            ));
        }

        Ok(())
    }
}

fn validate_source(metric: Metric, source: &SourceSpec) -> Result<()> {
    if source.delimiter_byte().is_none() {
        return Err(app_err!(
            "sources.{metric}.delimiter must be a single ASCII character, got {:?}",
            source.delimiter
        ));
    }

    match &source.layout {
        Layout::Column { key_column, value_column } => {
            if key_column.trim().is_empty() || value_column.trim().is_empty() {
                return Err(app_err!("sources.{metric}.layout must name both a key column and a value column"));
            }
        }
        Layout::LatestNonEmpty { key_column } => {
            if key_column.trim().is_empty() {
                return Err(app_err!("sources.{metric}.layout must name a key column"));
            }
        }
        Layout::Transposed { row_label, row_index, .. } => {
            if row_label.is_some() == row_index.is_some() {
                return Err(app_err!("sources.{metric}.layout must set exactly one of row_label and row_index"));
            }
        }
    }

    if let Some((key, value)) = source.fallback.iter().find(|(_, value)| !value.is_finite() || **value < 0.0) {
        return Err(app_err!("sources.{metric}.fallback for '{key}' must be a non-negative number, got {value}"));
    }

    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
