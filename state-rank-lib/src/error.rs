//! Failures raised while building the state table.
//!
//! Only fatal conditions live here. A state that is missing from a source is not an
//! error, and neither is a source row whose key is not registered; the latter is
//! logged as a warning and reported through [`Extraction::unmatched`](crate::sources::Extraction::unmatched).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The key source is empty, or one of its rows has no key.
    #[error("missing key data in the {source_name} source: {reason}")]
    MissingKeyData { source_name: String, reason: String },

    /// A matched cell could not be parsed as a number.
    #[error("malformed {source_name} value '{value}' for state '{state}'")]
    MalformedMetric {
        source_name: String,
        state: String,
        value: String,
    },

    /// A configured column is not present in the source header.
    #[error("the {source_name} source has no column named '{column}'")]
    MissingColumn { source_name: String, column: String },

    /// The configured data row of a transposed source could not be found.
    #[error("the {source_name} source has no data row matching {row}")]
    MissingRow { source_name: String, row: String },

    /// A configured fallback names a key that is not in the key registry.
    #[error("the {source_name} source has a fallback for unknown state '{key}'")]
    UnknownFallback { source_name: String, key: String },

    #[error("unable to read the {source_name} source")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },
}

impl PipelineError {
    pub(crate) fn missing_column(source_name: impl Into<String>, column: &str) -> Self {
        Self::MissingColumn {
            source_name: source_name.into(),
            column: column.to_string(),
        }
    }
}
