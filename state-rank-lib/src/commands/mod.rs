//! Command-line interface and orchestration for state-rank
//!
//! This module implements the CLI commands and drives the pipeline end to end: it parses
//! arguments, loads configuration, reads the sources, runs the join and ranking, and writes
//! the requested reports.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **analyze**: Read the four sources, build the ranked state table, and render it as CSV,
//!   JSON, Excel, or console output
//! - **init**: Generate a default configuration file describing the expected source layouts
//! - **validate**: Check that a configuration file parses and is consistent
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. `analyze` reads every source fully into memory before any
//! computation and renders every report into memory before any file is written, so a fatal
//! error leaves no partial output behind.
//!
//! All user-facing output goes through the [`Host`] trait so tests can capture it.

mod analyze;
mod common;
mod host;
mod init;
mod run;
mod validate;

pub use analyze::{AnalyzeArgs, analyze};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};

#[cfg(test)]
pub(crate) use host::TestHost;
