//! Converter state and its update operations.
//!
//! All state lives in [`ConverterState`] and is passed explicitly to whoever
//! drives it (the CLI commands or the interactive session).
use super::chart::ChartSeries;
use super::conversion::{self, Conversion};
use super::currency::Currency;
use super::rates::{RateProvider, RateTable};
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum RateStatus {
    NotLoaded,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ConverterState {
    amount: String,
    from: Currency,
    to: Currency,
    rates: RateTable,
    loading: bool,
    last_error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new("1", Currency::BRL, Currency::USD)
    }
}

impl ConverterState {
    pub fn new(amount: &str, from: Currency, to: Currency) -> Self {
        Self {
            amount: amount.to_string(),
            from,
            to,
            rates: RateTable::default(),
            loading: false,
            last_error: None,
            updated_at: None,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn from(&self) -> Currency {
        self.from
    }

    pub fn to(&self) -> Currency {
        self.to
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.to_string();
    }

    pub fn set_from(&mut self, currency: Currency) {
        self.from = currency;
    }

    pub fn set_to(&mut self, currency: Currency) {
        self.to = currency;
    }

    /// Exchanges source and target currencies. Nothing else changes.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// Runs the conversion engine over the current inputs.
    pub fn conversion(&self) -> Conversion {
        conversion::convert(&self.amount, self.from, self.to, &self.rates)
    }

    pub fn chart(&self) -> Option<ChartSeries> {
        ChartSeries::from_rates(&self.rates)
    }

    pub fn rate_status(&self) -> RateStatus {
        if self.loading {
            RateStatus::Loading
        } else if let Some(e) = &self.last_error {
            RateStatus::Failed(e.clone())
        } else if self.rates.is_empty() {
            RateStatus::NotLoaded
        } else {
            RateStatus::Ready
        }
    }

    /// First phase of a refresh: marks the rates as loading.
    pub fn begin_fetch(&mut self) {
        debug!("Rate fetch started");
        self.loading = true;
    }

    /// Second phase of a refresh. A successful fetch replaces the whole
    /// table; a failure is logged and the current table is kept.
    pub fn finish_fetch(&mut self, result: Result<RateTable>) {
        match result {
            Ok(rates) => {
                info!(count = rates.len(), "Rates updated");
                self.rates = rates;
                self.last_error = None;
                self.updated_at = Some(Utc::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch rates");
                self.last_error = Some(e.to_string());
            }
        }
        self.loading = false;
    }
}

/// Fetches fresh rates from `provider` into `state`.
pub async fn refresh_rates(state: &mut ConverterState, provider: &dyn RateProvider) {
    state.begin_fetch();
    let result = provider.fetch_rates().await;
    state.finish_fetch(result);
}
