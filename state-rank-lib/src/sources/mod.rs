//! Reading state-level sources and extracting one value per state
//!
//! # Implementation Model
//!
//! Every source is first read into a [`RawTable`]: a header record plus data rows of
//! string cells, parsed with the source's own delimiter and header offset. Nothing is
//! interpreted at that stage.
//!
//! The [`KeyRegistry`] is built from the key source and owns the canonical
//! [`StateKey`](crate::metrics::StateKey) of every state together with every alias other
//! sources use to refer to it. [`extract`] then walks a metric source according to its
//! configured [`Layout`](crate::config::Layout), resolves each label through the
//! registry, and produces a [`MetricSeries`](crate::metrics::MetricSeries).
//!
//! Labels the registry does not know are skipped with a warning. A registered state the
//! source does not mention is left out of the series. A cell that should hold a number
//! but does not aborts the run.

mod amount;
mod extractor;
mod key_registry;
mod raw_table;

pub use amount::parse_amount;
pub use extractor::{Extraction, extract};
pub use key_registry::{KeyRegistry, derive_display_name};
pub use raw_table::RawTable;

pub(crate) const LOG_TARGET: &str = "   sources";
