//! Shapes a rate table into a labelled series for bar chart rendering.

use super::currency::Currency;
use super::rates::RateTable;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<Currency>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Builds `[BRL, USD, EUR, GBP]` against their buy rates. Returns `None`
    /// unless every currency has a rate.
    pub fn from_rates(rates: &RateTable) -> Option<Self> {
        let values = Currency::ALL
            .iter()
            .map(|c| rates.get(*c))
            .collect::<Option<Vec<f64>>>()?;

        Some(Self {
            labels: Currency::ALL.to_vec(),
            values,
        })
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn points(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.labels.iter().copied().zip(self.values.iter().copied())
    }
}
