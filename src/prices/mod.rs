//! Token prices as published by the price list endpoint.
//!
//! The endpoint returns a JSON array of `{currency, date, price}` records. Prices are
//! parsed explicitly: numbers are kept, numeric strings are parsed, anything else is
//! recorded as "no price". Only finite prices above zero are considered valid.

pub mod client;

use std::collections::BTreeMap;

use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::format::to_fixed;

pub use client::{load_prices, PriceClient};

/// One record of the price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub currency: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub price: Value,
}

impl PriceRecord {
    pub fn new(currency: &str, price: Value) -> Self {
        Self {
            currency: currency.to_string(),
            date: None,
            price,
        }
    }
}

/// Currency -> USD price. Entries may hold no usable price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceMap {
    prices: BTreeMap<String, Option<f64>>,
}

impl PriceMap {
    /// Builds the map from records. A later record for a currency replaces an earlier one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PriceRecord>,
    {
        let prices = records
            .into_iter()
            .map(|record| {
                let price = parse_price(&record.price);
                (record.currency, price)
            })
            .collect();

        Self { prices }
    }

    /// Parses the raw body of the price list endpoint
    ///
    /// # Errors
    /// * If the body is not a JSON array of price records
    pub fn from_json(body: &str) -> Result<Self> {
        let records: Vec<PriceRecord> = serde_json::from_str(body)?;
        Ok(Self::from_records(records))
    }

    /// The price of `currency` if it is finite and strictly positive
    pub fn valid_price(&self, currency: &str) -> Option<f64> {
        self.prices
            .get(currency)
            .copied()
            .flatten()
            .filter(|price| is_valid_price(*price))
    }

    /// The parsed price of `currency`, valid or not
    pub fn raw_price(&self, currency: &str) -> Option<f64> {
        self.prices.get(currency).copied().flatten()
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.prices.contains_key(currency)
    }

    /// Every currency in the list, sorted
    pub fn tokens(&self) -> Vec<&str> {
        self.prices.keys().map(String::as_str).collect()
    }

    /// Currencies that can be priced, sorted
    pub fn valid_tokens(&self) -> Vec<&str> {
        self.prices
            .iter()
            .filter(|(_, price)| price.is_some_and(is_valid_price))
            .map(|(currency, _)| currency.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

fn parse_price(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Formats a USD price en-US style: `$` sign, thousands separators, 2 to 6 decimals.
/// Missing, zero or non-finite prices render as `N/A`.
pub fn format_usd(price: Option<f64>) -> String {
    let Some(price) = price.filter(|p| p.is_finite() && *p != 0.0) else {
        return "N/A".to_string();
    };

    let fixed = to_fixed(price.abs(), 6);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}
