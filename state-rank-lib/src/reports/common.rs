//! Common utilities shared across report generators.

use super::StateRecord;
use crate::config::OutputSpec;

/// Report column headers, in output order.
pub const COLUMN_HEADERS: [&str; 10] = [
    "state_name",
    "census_population",
    "population_rank",
    "median_household_income",
    "median_household_income_rank",
    "median_sale_price",
    "median_sale_price_rank",
    "house_affordability_ratio",
    "house_affordability_rank",
    "blurb",
];

/// Format a head count.
pub fn format_count(value: u64, group_digits: bool) -> String {
    let digits = value.to_string();
    if group_digits { group_thousands(&digits) } else { digits }
}

/// Format a currency amount.
///
/// Whole amounts print without decimals and fractional amounts with two.
pub fn format_currency(value: f64, output: &OutputSpec) -> String {
    let text = format!("{value:.2}");
    let text = text.strip_suffix(".00").map_or_else(|| text.clone(), str::to_string);

    let text = if output.group_digits {
        match text.split_once('.') {
            Some((whole, fraction)) => format!("{}.{fraction}", group_thousands(whole)),
            None => group_thousands(&text),
        }
    } else {
        text
    };

    format!("{}{text}", output.currency_prefix)
}

/// Format the affordability ratio with the configured precision.
pub fn format_ratio(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Round to a number of decimal places for numeric report formats.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let decimals = i32::try_from(decimals).unwrap_or(i32::MAX);
    let scale = 10_f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() { rounded } else { value }
}

/// Render every cell of a record as text, with empty strings for absent values.
pub fn record_cells(record: &StateRecord, output: &OutputSpec) -> [String; 10] {
    let rank = |rank: Option<u32>| rank.map(|r| r.to_string()).unwrap_or_default();
    let currency = |value: Option<f64>| value.map(|v| format_currency(v, output)).unwrap_or_default();

    [
        record.name.clone(),
        record.population.map(|p| format_count(p, output.group_digits)).unwrap_or_default(),
        rank(record.population_rank),
        currency(record.income),
        rank(record.income_rank),
        currency(record.sale_price),
        rank(record.sale_price_rank),
        record.affordability.map(|a| format_ratio(a, output.ratio_decimals)).unwrap_or_default(),
        rank(record.affordability_rank),
        record.blurb.clone(),
    ]
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = digits.strip_prefix('-').map_or(("", digits), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}")
}
