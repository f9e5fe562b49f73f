//! Supported currencies

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Currencies the converter knows about. `BRL` is the base every rate is quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[allow(clippy::upper_case_acronyms)]
pub enum Currency {
    BRL,
    USD,
    EUR,
    GBP,
}

impl Currency {
    pub const BASE: Currency = Currency::BRL;

    /// All currencies in display order, base first.
    pub const ALL: [Currency; 4] = [Currency::BRL, Currency::USD, Currency::EUR, Currency::GBP];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::BRL => "Brazilian Real",
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "Pound Sterling",
        }
    }

    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BRL" => Ok(Currency::BRL),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            _ => Err(anyhow::anyhow!(
                "Unsupported currency: {} (expected one of BRL, USD, EUR, GBP)",
                s
            )),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> String {
        currency.code().to_string()
    }
}
