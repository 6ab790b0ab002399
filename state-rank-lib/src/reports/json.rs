use super::{OutputTable, common};
use crate::Result;
use crate::config::OutputSpec;
use core::fmt::Write;
use serde_json::{Value, json};

#[expect(unused_results, reason = "Map::insert returns the previous value, which is always None here")]
pub fn generate<W: Write>(table: &OutputTable, output: &OutputSpec, writer: &mut W) -> Result<()> {
    let mut rows = Vec::with_capacity(table.records.len());

    for record in &table.records {
        let values = [
            json!(record.name),
            json!(record.population),
            json!(record.population_rank),
            json!(record.income),
            json!(record.income_rank),
            json!(record.sale_price),
            json!(record.sale_price_rank),
            record.affordability.map_or(Value::Null, |ratio| json!(common::round_to(ratio, output.ratio_decimals))),
            json!(record.affordability_rank),
            if record.blurb.is_empty() { Value::Null } else { json!(record.blurb) },
        ];

        let mut row = serde_json::Map::new();
        for (header, value) in common::COLUMN_HEADERS.iter().zip(values) {
            row.insert((*header).to_string(), value);
        }
        rows.push(Value::Object(row));
    }

    write!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
    Ok(())
}
