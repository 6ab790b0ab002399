use super::{OutputTable, StateRecord, common};
use crate::Result;
use crate::config::OutputSpec;
use rust_xlsxwriter::{DocProperties, Format, FormatAlign, Workbook, Worksheet};
use std::io::Write;

const SHEET_NAME: &str = "State Rankings";

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
pub fn generate<W: Write>(table: &OutputTable, output: &OutputSpec, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("state-rank");
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let formats = CellFormats::new(output);

    for (col, header) in (0_u16..).zip(common::COLUMN_HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }

    worksheet.set_freeze_panes(1, 1)?;

    for (row, record) in (1_u32..).zip(&table.records) {
        write_record(worksheet, row, record, &formats)?;
    }

    worksheet.autofit();

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

struct CellFormats {
    count: Format,
    currency: Format,
    currency_cents: Format,
    ratio: Format,
    rank: Format,
}

impl CellFormats {
    fn new(output: &OutputSpec) -> Self {
        let grouping = if output.group_digits { "#,##0" } else { "0" };
        let prefix = if output.currency_prefix.is_empty() {
            String::new()
        } else {
            format!("\"{}\"", output.currency_prefix.replace('"', ""))
        };

        let ratio = if output.ratio_decimals == 0 {
            "0".to_string()
        } else {
            format!("0.{}", "0".repeat(output.ratio_decimals))
        };

        Self {
            count: Format::new().set_num_format(grouping),
            currency: Format::new().set_num_format(format!("{prefix}{grouping}")),
            currency_cents: Format::new().set_num_format(format!("{prefix}{grouping}.00")),
            ratio: Format::new().set_num_format(ratio),
            rank: Format::new().set_align(FormatAlign::Center),
        }
    }

    /// Whole amounts show no decimals, matching the text reports.
    fn currency_for(&self, value: Option<f64>) -> &Format {
        match value {
            Some(value) if !common::format_currency(value, &OutputSpec::default()).contains('.') => &self.currency,
            Some(_) => &self.currency_cents,
            None => &self.currency,
        }
    }
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
#[expect(clippy::cast_precision_loss, reason = "Intentional conversion to f64 for Excel output")]
fn write_record(worksheet: &mut Worksheet, row: u32, record: &StateRecord, formats: &CellFormats) -> Result<()> {
    worksheet.write_string(row, 0, &record.name)?;

    let numbers = [
        (1_u16, record.population.map(|p| p as f64), &formats.count),
        (2, record.population_rank.map(f64::from), &formats.rank),
        (3, record.income, formats.currency_for(record.income)),
        (4, record.income_rank.map(f64::from), &formats.rank),
        (5, record.sale_price, formats.currency_for(record.sale_price)),
        (6, record.sale_price_rank.map(f64::from), &formats.rank),
        (7, record.affordability, &formats.ratio),
        (8, record.affordability_rank.map(f64::from), &formats.rank),
    ];

    for (col, value, format) in numbers {
        if let Some(value) = value {
            worksheet.write_number_with_format(row, col, value, format)?;
        }
    }

    if !record.blurb.is_empty() {
        worksheet.write_string(row, 9, &record.blurb)?;
    }

    Ok(())
}
