use crate::metrics::MetricSeries;
use serde::{Deserialize, Serialize};

/// How the affordability ratio is formed from income and sale price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioFormula {
    /// Median household income divided by median sale price; higher is more affordable
    #[default]
    IncomeOverPrice,

    /// Median sale price divided by median household income; lower is more affordable
    PriceOverIncome,
}

/// Derive the affordability ratio for every state with both an income and a sale price.
///
/// A state missing either input, or with a zero sale price, has no ratio. Under
/// [`RatioFormula::PriceOverIncome`] a zero income also leaves the state without one.
#[must_use]
pub fn affordability(income: &MetricSeries, sale_price: &MetricSeries, formula: RatioFormula) -> MetricSeries {
    income
        .iter()
        .filter_map(|(key, income)| {
            let price = sale_price.get(key).filter(|&price| price > 0.0)?;
            let ratio = match formula {
                RatioFormula::IncomeOverPrice => income / price,
                RatioFormula::PriceOverIncome if income > 0.0 => price / income,
                RatioFormula::PriceOverIncome => return None,
            };

            Some((key.clone(), ratio))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::StateKey;
    use crate::ranking::{Direction, TiePolicy, rank};

    #[test]
    fn test_income_over_price() {
        let income = MetricSeries::from([("CA", 85_000.0), ("TX", 67_000.0)]);
        let price = MetricSeries::from([("CA", 650_000.0), ("TX", 330_000.0)]);

        let ratios = affordability(&income, &price, RatioFormula::IncomeOverPrice);

        let ca = ratios.get(&StateKey::new("CA")).unwrap();
        let tx = ratios.get(&StateKey::new("TX")).unwrap();
        assert!((ca - 0.1308).abs() < 1e-4, "CA ratio was {ca}");
        assert!((tx - 0.2030).abs() < 1e-4, "TX ratio was {tx}");

        let ranks = rank(&ratios, Direction::HighIsBest, TiePolicy::Dense);
        assert_eq!(ranks.get(&StateKey::new("TX")), Some(1));
        assert_eq!(ranks.get(&StateKey::new("CA")), Some(2));
    }

    #[test]
    fn test_price_over_income() {
        let income = MetricSeries::from([("CA", 100_000.0)]);
        let price = MetricSeries::from([("CA", 650_000.0)]);

        let ratios = affordability(&income, &price, RatioFormula::PriceOverIncome);
        let ca = ratios.get(&StateKey::new("CA")).unwrap();
        assert!((ca - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_input_yields_absence() {
        let income = MetricSeries::from([("CA", 85_000.0), ("TX", 67_000.0)]);
        let price = MetricSeries::from([("CA", 650_000.0), ("WY", 300_000.0)]);

        let ratios = affordability(&income, &price, RatioFormula::IncomeOverPrice);
        assert_eq!(ratios.len(), 1);
        assert!(ratios.contains(&StateKey::new("CA")));
        assert!(!ratios.contains(&StateKey::new("TX")));
        assert!(!ratios.contains(&StateKey::new("WY")));
    }

    #[test]
    fn test_zero_price_yields_absence() {
        let income = MetricSeries::from([("CA", 85_000.0)]);
        let price = MetricSeries::from([("CA", 0.0)]);

        assert!(affordability(&income, &price, RatioFormula::IncomeOverPrice).is_empty());
    }

    #[test]
    fn test_zero_price_under_inverted_formula_yields_absence() {
        let income = MetricSeries::from([("CA", 85_000.0), ("TX", 67_000.0)]);
        let price = MetricSeries::from([("CA", 650_000.0), ("TX", 0.0)]);

        let ratios = affordability(&income, &price, RatioFormula::PriceOverIncome);
        assert_eq!(ratios.get(&StateKey::new("TX")), None);

        let ranks = rank(&ratios, Direction::LowIsBest, TiePolicy::Dense);
        assert_eq!(ranks.get(&StateKey::new("TX")), None);
        assert_eq!(ranks.get(&StateKey::new("CA")), Some(1));
    }

    #[test]
    fn test_zero_income_under_inverted_formula_yields_absence() {
        let income = MetricSeries::from([("CA", 0.0)]);
        let price = MetricSeries::from([("CA", 650_000.0)]);

        assert!(affordability(&income, &price, RatioFormula::PriceOverIncome).is_empty());
    }
}
