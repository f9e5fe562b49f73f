use crate::core::currency::Currency;
use crate::core::rates::{RateProvider, RateTable};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Buy rates from the HG Brasil finance endpoint, quoted in BRL.
pub struct HgBrasilProvider {
    base_url: String,
    key: Option<String>,
}

impl HgBrasilProvider {
    pub fn new(base_url: &str, key: Option<&str>) -> Self {
        HgBrasilProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.map(str::to_string),
        }
    }

    fn finance_url(&self) -> Result<reqwest::Url> {
        let mut params = vec![("format", "json-cors")];
        if let Some(key) = &self.key {
            params.push(("key", key.as_str()));
        }
        let endpoint = format!("{}/finance", self.base_url);
        reqwest::Url::parse_with_params(&endpoint, &params)
            .map_err(|e| anyhow!("Invalid finance URL {}: {}", endpoint, e))
    }
}

#[derive(Debug, Deserialize)]
struct FinanceResponse {
    valid_key: Option<bool>,
    results: FinanceResults,
}

#[derive(Debug, Deserialize)]
struct FinanceResults {
    currencies: Currencies,
}

#[derive(Debug, Deserialize)]
struct Currencies {
    source: Option<String>,
    #[serde(rename = "USD")]
    usd: Quote,
    #[serde(rename = "EUR")]
    eur: Quote,
    #[serde(rename = "GBP")]
    gbp: Quote,
}

#[derive(Debug, Deserialize)]
struct Quote {
    buy: f64,
}

#[async_trait]
impl RateProvider for HgBrasilProvider {
    #[instrument(name = "HgBrasilRateFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<RateTable> {
        let url = self.finance_url()?;
        debug!("Requesting rates from {}", self.base_url);

        let client = reqwest::Client::builder().user_agent("cambio/0.1").build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for rates from: {}", e, self.base_url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for rates from: {}",
                response.status(),
                self.base_url
            ));
        }

        let text = response.text().await?;
        let data: FinanceResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rates response: {}", e))?;

        if data.valid_key == Some(false) {
            warn!("Rate source reports the API key as invalid");
        }

        let currencies = data.results.currencies;
        if let Some(source) = &currencies.source {
            if source != Currency::BASE.code() {
                return Err(anyhow!(
                    "Unexpected rate source currency: {} (expected {})",
                    source,
                    Currency::BASE
                ));
            }
        }

        RateTable::new([
            (Currency::USD, currencies.usd.buy),
            (Currency::EUR, currencies.eur.buy),
            (Currency::GBP, currencies.gbp.buy),
        ])
    }
}
