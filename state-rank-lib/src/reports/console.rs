use super::{OutputTable, common};
use crate::Result;
use crate::config::OutputSpec;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Columns shown in the table; the blurb is listed underneath instead.
const TABLE_COLUMNS: usize = 9;

/// Rank columns, highlighted when a state ranks first.
const RANK_COLUMNS: [usize; 4] = [2, 4, 6, 8];

pub fn generate<W: Write>(table: &OutputTable, output: &OutputSpec, use_colors: bool, writer: &mut W) -> Result<()> {
    if table.records.is_empty() {
        return Ok(());
    }

    let rows: Vec<[String; 10]> = table.records.iter().map(|record| common::record_cells(record, output)).collect();

    let mut widths = [0_usize; TABLE_COLUMNS];
    for (index, width) in widths.iter_mut().enumerate() {
        *width = rows
            .iter()
            .map(|row| row[index].chars().count())
            .chain(core::iter::once(common::COLUMN_HEADERS[index].len()))
            .max()
            .unwrap_or_default();
    }

    let header = common::COLUMN_HEADERS[..TABLE_COLUMNS]
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (name, width))| pad(name, width, index == 0))
        .collect::<Vec<_>>()
        .join("  ");

    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    for row in &rows {
        let line = row[..TABLE_COLUMNS]
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(index, (cell, width))| {
                let cell = pad(cell, width, index == 0);
                if use_colors && RANK_COLUMNS.contains(&index) && cell.trim() == "1" {
                    cell.green().bold().to_string()
                } else {
                    cell
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    if let Some(period) = &table.latest_period {
        writeln!(writer)?;
        writeln!(writer, "Median sale prices as of {period}")?;
    }

    let blurbs: Vec<&str> = table.records.iter().map(|r| r.blurb.as_str()).filter(|b| !b.is_empty()).collect();
    if !blurbs.is_empty() {
        writeln!(writer)?;
        for blurb in blurbs {
            writeln!(writer, "  {blurb}")?;
        }
    }

    Ok(())
}

/// Left-align text columns and right-align numeric ones.
fn pad(text: &str, width: usize, left: bool) -> String {
    if left { format!("{text:<width$}") } else { format!("{text:>width$}") }
}
