use super::{OutputTable, common};
use crate::Result;
use crate::config::OutputSpec;
use core::fmt::Write;
use std::borrow::Cow;

pub fn generate<W: Write>(table: &OutputTable, output: &OutputSpec, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", common::COLUMN_HEADERS.join(","))?;

    for record in &table.records {
        let cells = common::record_cells(record, output);
        for (index, cell) in cells.iter().enumerate() {
            if index > 0 {
                write!(writer, ",")?;
            }
            write!(writer, "{}", escape_csv(cell))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}
