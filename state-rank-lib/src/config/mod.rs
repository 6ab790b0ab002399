//! Configuration for a state-rank run
//!
//! The configuration is a TOML document with one table per input source, a ranking policy
//! per metric, the affordability formula, and output formatting options. Each source names
//! its own delimiter, header row, and [`Layout`], so the pipeline never assumes that two
//! sources share a shape.
//!
//! A default configuration is embedded in the binary and is used whenever no configuration
//! file is found.

#[expect(clippy::module_inception, reason = "The config type lives in a module of the same name")]
mod config;
mod source_spec;

pub use config::{AffordabilitySpec, Config, DEFAULT_CONFIG_FILE_NAME, DEFAULT_CONFIG_TOML, MetricRanking, OutputSpec, RankingSpec, SourcesSpec};
pub use source_spec::{KeysSpec, Layout, SourceSpec};
