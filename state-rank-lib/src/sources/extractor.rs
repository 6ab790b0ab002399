use super::amount::{is_missing, parse_amount};
use super::{KeyRegistry, LOG_TARGET, RawTable};
use crate::config::{Layout, SourceSpec};
use crate::error::PipelineError;
use crate::metrics::{Metric, MetricSeries, StateKey, normalize_label};

/// The outcome of extracting one metric from its source.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// One value per state that had one
    pub series: MetricSeries,

    /// Labels in the source that matched no registered state
    pub unmatched: Vec<String>,

    /// Header of the newest period column, for period-based layouts
    pub latest_period: Option<String>,
}

impl Extraction {
    fn record(&mut self, metric: Metric, key: &StateKey, value: Option<f64>) {
        let Some(value) = value else {
            log::debug!(target: LOG_TARGET, "No {metric} value for '{key}'");
            return;
        };

        if !self.series.insert(key.clone(), value) {
            log::warn!(target: LOG_TARGET, "The {metric} source has more than one value for '{key}', keeping the first");
        }
    }

    fn skip(&mut self, metric: Metric, label: &str) {
        log::warn!(target: LOG_TARGET, "Ignoring {metric} entry '{label}' which matches no known state");
        self.unmatched.push(label.to_string());
    }
}

/// Extract one value per registered state from a metric source.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedMetric`] when a matched cell is not a number,
/// [`PipelineError::MissingColumn`] or [`PipelineError::MissingRow`] when the layout does not fit
/// the source, and [`PipelineError::UnknownFallback`] when a fallback names an unregistered state.
pub fn extract(metric: Metric, table: &RawTable, spec: &SourceSpec, registry: &KeyRegistry) -> Result<Extraction, PipelineError> {
    let source_name = metric.to_string();
    let parse = |key: &StateKey, cell: &str| -> Result<Option<f64>, PipelineError> {
        if is_missing(cell, &spec.missing_markers) {
            return Ok(None);
        }

        parse_amount(cell).map(Some).ok_or_else(|| PipelineError::MalformedMetric {
            source_name: source_name.clone(),
            state: key.to_string(),
            value: cell.to_string(),
        })
    };

    let mut extraction = Extraction::default();

    match &spec.layout {
        Layout::Column { key_column, value_column } => {
            let key_index = table
                .column_index(key_column)
                .ok_or_else(|| PipelineError::missing_column(&source_name, key_column))?;
            let value_index = table
                .column_index(value_column)
                .ok_or_else(|| PipelineError::missing_column(&source_name, value_column))?;

            for row in table.rows() {
                let label = RawTable::cell(row, key_index);
                match registry.resolve(label) {
                    Some(key) => extraction.record(metric, key, parse(key, RawTable::cell(row, value_index))?),
                    None => extraction.skip(metric, label),
                }
            }
        }

        Layout::LatestNonEmpty { key_column } => {
            let key_index = table
                .column_index(key_column)
                .ok_or_else(|| PipelineError::missing_column(&source_name, key_column))?;

            let periods: Vec<usize> = (key_index + 1..table.headers().len())
                .filter(|&index| !table.headers()[index].trim().is_empty())
                .collect();

            extraction.latest_period = periods.last().map(|&index| table.headers()[index].trim().to_string());

            for row in table.rows() {
                let label = RawTable::cell(row, key_index);
                let Some(key) = registry.resolve(label) else {
                    extraction.skip(metric, label);
                    continue;
                };

                let newest = periods
                    .iter()
                    .rev()
                    .map(|&index| RawTable::cell(row, index))
                    .find(|cell| !is_missing(cell, &spec.missing_markers));

                let value = match newest {
                    Some(cell) => parse(key, cell)?,
                    None => None,
                };
                extraction.record(metric, key, value);
            }
        }

        Layout::Transposed {
            header_suffix,
            row_label,
            row_index,
        } => {
            let row = select_row(table, row_label.as_deref(), *row_index)
                .ok_or_else(|| PipelineError::MissingRow {
                    source_name: source_name.clone(),
                    row: row_label
                        .as_ref()
                        .map_or_else(|| format!("index {}", row_index.unwrap_or_default()), |label| format!("'{label}'")),
                })?;

            // the first column holds row labels
            for (index, header) in table.headers().iter().enumerate().skip(1) {
                let Some(label) = header.trim().strip_suffix(header_suffix.as_str()) else {
                    continue;
                };

                let label = label.trim();
                match registry.resolve(label) {
                    Some(key) => extraction.record(metric, key, parse(key, RawTable::cell(row, index))?),
                    None => extraction.skip(metric, label),
                }
            }
        }
    }

    for (label, &value) in &spec.fallback {
        let key = registry.resolve(label).ok_or_else(|| PipelineError::UnknownFallback {
            source_name: source_name.clone(),
            key: label.clone(),
        })?;

        if !extraction.series.contains(key) {
            log::debug!(target: LOG_TARGET, "Using fallback {metric} value {value} for '{key}'");
            let _ = extraction.series.insert(key.clone(), value);
        }
    }

    log::info!(target: LOG_TARGET, "Extracted {} {metric} values ({} unmatched entries)", extraction.series.len(), extraction.unmatched.len());
    Ok(extraction)
}

fn select_row<'a>(table: &'a RawTable, row_label: Option<&str>, row_index: Option<usize>) -> Option<&'a [String]> {
    if let Some(label) = row_label {
        let wanted = normalize_label(label);
        return table
            .rows()
            .iter()
            .find(|row| normalize_label(RawTable::cell(row, 0)) == wanted)
            .map(Vec::as_slice);
    }

    table.rows().get(row_index?).map(Vec::as_slice)
}
