//! Exchange rate tables and the rate source abstraction

use super::currency::Currency;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Buy rates quoted against [`Currency::BASE`]: each entry is how many base
/// units one unit of that currency buys.
///
/// A non-empty table always carries the base currency at exactly `1.0`.
/// `RateTable::default()` is the empty table, i.e. no rates loaded yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<Currency, f64>,
}

impl RateTable {
    /// Builds a table from buy rates. The base entry is added automatically;
    /// passing it explicitly is allowed only with a rate of `1.0`.
    pub fn new(buy_rates: impl IntoIterator<Item = (Currency, f64)>) -> Result<Self> {
        let mut rates = BTreeMap::new();
        rates.insert(Currency::BASE, 1.0);

        for (currency, rate) in buy_rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(anyhow!("Invalid buy rate for {}: {}", currency, rate));
            }
            if currency.is_base() && rate != 1.0 {
                return Err(anyhow!(
                    "Base currency {} must have a rate of 1, got {}",
                    currency,
                    rate
                ));
            }
            rates.insert(currency, rate);
        }

        Ok(Self { rates })
    }

    pub fn get(&self, currency: Currency) -> Option<f64> {
        self.rates.get(&currency).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Entries ordered by currency, base first.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }
}

/// A source of live buy rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable>;
}
