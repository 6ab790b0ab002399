#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for state-rank
//!
//! This library joins four state-level datasets (state keys, population, median household
//! income, and median home sale price) on a canonical state key, ranks every state on each
//! metric, derives a housing affordability ratio, and renders one denormalized table.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`config`]: Per-source layouts, ranking policies, and output options
//! - [`sources`]: Raw tables, the key registry, and metric extraction
//! - [`pipeline`]: Runs the join, ranking, and assembly over sources already in memory
//! - [`metrics`]: State keys, metric series, and rank tables
//! - [`ranking`]: The rank engine and the affordability calculator
//! - [`reports`]: Record assembly, blurbs, and report generation in multiple formats
//! - [`error`]: Fatal data errors raised by the pipeline

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod ranking;
pub mod reports;
pub mod sources;

pub use crate::commands::{Host, run};
pub use crate::error::PipelineError;
