use crate::metrics::StateKey;

/// One output row: a state's values, ranks, and blurb.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub key: StateKey,
    pub name: String,
    pub population: Option<u64>,
    pub population_rank: Option<u32>,
    pub income: Option<f64>,
    pub income_rank: Option<u32>,
    pub sale_price: Option<f64>,
    pub sale_price_rank: Option<u32>,
    pub affordability: Option<f64>,
    pub affordability_rank: Option<u32>,
    pub blurb: String,
}

/// The assembled table for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTable {
    /// One record per registered state, in key source order
    pub records: Vec<StateRecord>,

    /// Header of the period the sale prices were taken from, when the source has periods
    pub latest_period: Option<String>,
}
