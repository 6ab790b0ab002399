//! Assembly of the state table and report generation in multiple formats
//!
//! # Implementation Model
//!
//! [`assemble`] walks the key registry in source order and builds one [`StateRecord`] per
//! state from the ranked metrics, including a blurb describing the state's standing. A
//! blurb is either a one-sentence summary or one sentence per metric placing the state in
//! the nation, with ranks written as `#3` or `3rd`. Absent values stay `None` all the way to the renderers.
//!
//! Four report generators then render the resulting [`OutputTable`]:
//! - **CSV**: The primary output, with a fixed column order and RFC compliant escaping
//! - **JSON**: An array of row objects, with `null` for absent values
//! - **Excel**: Native .xlsx format with numeric cells and blanks for absent values
//! - **Console**: An aligned table followed by the blurbs, with optional ANSI colors
//!
//! The text renderers share the column headers and number formatting in the `common`
//! module, so a value prints the same way everywhere.

mod assembler;
mod blurb;
mod common;
mod console;
mod csv;
mod excel;
mod json;
mod state_record;

pub use assembler::assemble;
pub use blurb::{BlurbStyle, Blurbs, RankStyle, ordinal};
pub use common::COLUMN_HEADERS;
pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use excel::generate as generate_xlsx;
pub use json::generate as generate_json;
pub use state_record::{OutputTable, StateRecord};
