use super::{Blurbs, OutputTable, StateRecord};
use crate::metrics::StateKey;
use crate::ranking::RankedMetrics;
use crate::sources::KeyRegistry;

/// Build one record per registered state, in registry order.
#[must_use]
pub fn assemble(registry: &KeyRegistry, ranked: &RankedMetrics, blurbs: &Blurbs<'_>) -> OutputTable {
    let records = registry
        .keys()
        .iter()
        .map(|key| {
            let name = registry.display_name(key).unwrap_or_else(|| key.as_str()).to_string();
            record(key, name, ranked, blurbs)
        })
        .collect();

    OutputTable {
        records,
        latest_period: blurbs.latest_period().map(str::to_string),
    }
}

fn record(key: &StateKey, name: String, ranked: &RankedMetrics, blurbs: &Blurbs<'_>) -> StateRecord {
    let blurb = blurbs.describe(&name, |metric| ranked.get(metric).rank(key));

    StateRecord {
        key: key.clone(),
        population: ranked.population.value(key).map(to_count),
        population_rank: ranked.population.rank(key),
        income: ranked.income.value(key),
        income_rank: ranked.income.rank(key),
        sale_price: ranked.sale_price.value(key),
        sale_price_rank: ranked.sale_price.rank(key),
        affordability: ranked.affordability.value(key),
        affordability_rank: ranked.affordability.rank(key),
        blurb,
        name,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "extracted values are finite and non-negative, and populations fit in u64"
)]
fn to_count(value: f64) -> u64 {
    value.round() as u64
}
