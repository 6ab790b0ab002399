use crate::error::PipelineError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// A source as parsed rows of string cells, before any interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    #[must_use]
    pub const fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parse delimited text.
    ///
    /// Record `header_row` becomes the header and every record above it is dropped. Cells are
    /// trimmed, records may have differing lengths, and records whose cells are all empty are skipped.
    pub fn from_reader(reader: impl Read, delimiter: u8, header_row: usize, source_name: &str) -> Result<Self, PipelineError> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut headers = None;
        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        let mut index = 0;

        while csv_reader.read_record(&mut record).map_err(|source| PipelineError::Csv {
            source_name: source_name.to_string(),
            source,
        })? {
            if index < header_row {
                index += 1;
                continue;
            }
            index += 1;

            let cells: Vec<String> = record.iter().map(str::to_string).collect();
            if headers.is_none() {
                headers = Some(cells);
            } else if cells.iter().any(|cell| !cell.is_empty()) {
                rows.push(cells);
            }
        }

        Ok(Self {
            headers: headers.unwrap_or_default(),
            rows,
        })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the header named `name`, compared after trimming.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|header| header.trim() == name)
    }

    /// The cell of `row` at `index`, or an empty string for short rows.
    #[must_use]
    pub fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map_or("", |cell| cell.trim())
    }
}
