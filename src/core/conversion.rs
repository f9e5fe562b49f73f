//! Currency conversion through the common base currency.
//!
//! Conversion is fail-soft: bad input or missing rates never produce an
//! error, only the zero-value result `"0.00"`.
use super::currency::Currency;
use super::rates::RateTable;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use tracing::debug;

/// Why a conversion could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    InvalidAmount,
    MissingRate(Currency),
}

/// Outcome of a conversion. Displays with two decimals, or `0.00` when unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    Converted(f64),
    Unavailable(Unavailable),
}

impl Conversion {
    /// The converted value, or `0.0` for the zero-value result.
    pub fn value(&self) -> f64 {
        match self {
            Conversion::Converted(v) => *v,
            Conversion::Unavailable(_) => 0.0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }
}

impl Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// Parses user-entered amount text. Rejects anything that is not a finite,
/// non-negative number. A single `,` is read as the decimal separator when
/// there is no `.` in the text.
pub fn parse_amount(amount: &str) -> Option<f64> {
    let amount = amount.trim();
    let normalized = if !amount.contains('.') && amount.matches(',').count() == 1 {
        amount.replacen(',', ".", 1)
    } else {
        amount.to_string()
    };
    normalized
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a >= 0.0)
}

/// Rounds the stored binary value to 2 places, ties away from zero.
fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Converts raw amount text from one currency to another.
pub fn convert(amount: &str, from: Currency, to: Currency, rates: &RateTable) -> Conversion {
    match parse_amount(amount) {
        Some(a) => convert_amount(a, from, to, rates),
        None => {
            debug!(amount, "Amount is not a valid number");
            Conversion::Unavailable(Unavailable::InvalidAmount)
        }
    }
}

/// Converts an already parsed amount: `amount * rate(from) / rate(to)`.
pub fn convert_amount(amount: f64, from: Currency, to: Currency, rates: &RateTable) -> Conversion {
    if !amount.is_finite() || amount < 0.0 {
        return Conversion::Unavailable(Unavailable::InvalidAmount);
    }
    let Some(from_rate) = rates.get(from) else {
        return Conversion::Unavailable(Unavailable::MissingRate(from));
    };
    let Some(to_rate) = rates.get(to) else {
        return Conversion::Unavailable(Unavailable::MissingRate(to));
    };

    let in_base = amount * from_rate;
    Conversion::Converted(round2(in_base / to_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rates() -> RateTable {
        RateTable::new([
            (Currency::USD, 5.00),
            (Currency::EUR, 6.00),
            (Currency::GBP, 7.00),
        ])
        .unwrap()
    }

    #[test]
    fn test_base_to_foreign() {
        let result = convert("10", Currency::BRL, Currency::USD, &sample_rates());
        assert_eq!(result, Conversion::Converted(2.00));
        assert_eq!(result.to_string(), "2.00");
    }

    #[test]
    fn test_cross_rate_rounds_to_two_decimals() {
        let result = convert("100", Currency::USD, Currency::EUR, &sample_rates());
        assert_eq!(result.value(), 83.33);
        assert_eq!(result.to_string(), "83.33");
    }

    #[test]
    fn test_matches_formula_for_each_pair() {
        let rates = sample_rates();
        for from in Currency::ALL {
            for to in Currency::ALL {
                let a = 123.45;
                let exact = a * rates.get(from).unwrap() / rates.get(to).unwrap();
                let got = convert_amount(a, from, to, &rates).value();
                assert!((got - exact).abs() <= 0.005 + 1e-9, "{from}->{to}: {got}");
            }
        }
    }

    #[test]
    fn test_identity() {
        let rates = sample_rates();
        for c in Currency::ALL {
            assert_eq!(convert("42.129", c, c, &rates).value(), 42.13);
        }
    }

    #[test]
    fn test_round_trip_within_rounding() {
        let rates = sample_rates();
        let there = convert("250", Currency::GBP, Currency::USD, &rates);
        let back = convert_amount(there.value(), Currency::USD, Currency::GBP, &rates);
        assert!((back.value() - 250.0).abs() <= 0.01);
    }

    #[test]
    fn test_invalid_amount_is_zero_value() {
        let rates = sample_rates();
        for input in ["abc", "", "  ", "1.2.3", "NaN", "inf", "-5", "12abc", "1,2,3", "1.000,5"] {
            let result = convert(input, Currency::USD, Currency::EUR, &rates);
            assert_eq!(
                result,
                Conversion::Unavailable(Unavailable::InvalidAmount),
                "input {input:?}"
            );
            assert_eq!(result.to_string(), "0.00");
        }
    }

    #[test]
    fn test_missing_rates_is_zero_value() {
        let empty = RateTable::default();
        let result = convert("10", Currency::USD, Currency::EUR, &empty);
        assert_eq!(
            result,
            Conversion::Unavailable(Unavailable::MissingRate(Currency::USD))
        );
        assert_eq!(result.to_string(), "0.00");

        let partial = RateTable::new([(Currency::USD, 5.0)]).unwrap();
        let result = convert("10", Currency::USD, Currency::GBP, &partial);
        assert_eq!(
            result,
            Conversion::Unavailable(Unavailable::MissingRate(Currency::GBP))
        );
        assert!(!result.is_available());
    }

    #[test]
    fn test_rounds_stored_value_not_scaled_value() {
        let rates = sample_rates();
        for (input, expected) in [
            ("0.015", "0.01"),
            ("0.245", "0.24"),
            ("0.155", "0.15"),
            ("0.125", "0.13"),
            ("2.675", "2.67"),
        ] {
            let result = convert(input, Currency::BRL, Currency::BRL, &rates);
            assert_eq!(result.to_string(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_decimal_comma() {
        let rates = sample_rates();
        assert_eq!(parse_amount("1,5"), Some(1.5));
        assert_eq!(parse_amount(" 10,00 "), Some(10.0));
        assert_eq!(
            convert("10,5", Currency::BRL, Currency::USD, &rates).to_string(),
            "2.10"
        );
    }

    #[test]
    fn test_whitespace_and_zero_amount() {
        let rates = sample_rates();
        assert_eq!(
            convert(" 10 ", Currency::BRL, Currency::USD, &rates).to_string(),
            "2.00"
        );
        let zero = convert("0", Currency::EUR, Currency::GBP, &rates);
        assert!(zero.is_available());
        assert_eq!(zero.to_string(), "0.00");
    }
}
