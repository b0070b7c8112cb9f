/// Exchange rates and one shot swap quotes between two priced tokens.
/// The rate is a ratio of USD prices, no pool or fee model is involved.
use core::fmt::{self, Display};

use chrono::{DateTime, Utc};
use derive_more::{Display as DeriveDisplay, Error};

use crate::prices::PriceMap;
use crate::utils::constants::RATE_DECIMALS;
use crate::utils::format::to_fixed;

/// Which side of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveDisplay)]
pub enum Side {
    #[display("from")]
    From,
    #[display("to")]
    To,
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveDisplay, Error)]
pub enum SwapError {
    #[display("Invalid amount")]
    InvalidAmount,
    #[display("Invalid amount {input:?}, expected digits with at most one dot")]
    MalformedAmount {
        #[error(not(source))]
        input: String,
    },
    #[display("No {side} token selected")]
    MissingToken {
        #[error(not(source))]
        side: Side,
    },
    #[display("{token} has no valid price")]
    InvalidToken {
        #[error(not(source))]
        token: String,
    },
    #[display("Rate not available for {from}/{to}")]
    RateUnavailable { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    /// Units of `to` for one unit of `from`
    pub rate: f64,
}

impl ExchangeRate {
    /// `None` unless both tokens have a valid price
    pub fn between(prices: &PriceMap, from: &str, to: &str) -> Option<Self> {
        let from_price = prices.valid_price(from)?;
        let to_price = prices.valid_price(to)?;
        Some(Self::from_prices(from, to, from_price, to_price))
    }

    /// Both prices must be valid (finite, above zero)
    pub fn from_prices(from: &str, to: &str, from_price: f64, to_price: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            rate: from_price / to_price,
        }
    }

    pub fn formatted_rate(&self) -> String {
        to_fixed(self.rate, RATE_DECIMALS)
    }

    pub fn convert(&self, amount: f64) -> f64 {
        amount * self.rate
    }
}

impl Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {}", self.from, self.formatted_rate(), self.to)
    }
}

/// A priced swap of `amount_in` of `rate.from` into `amount_out` of `rate.to`
#[derive(Debug, Clone, PartialEq)]
pub struct SwapQuote {
    pub rate: ExchangeRate,
    pub amount_in: f64,
    pub amount_out: f64,
}

impl SwapQuote {
    pub fn new(rate: ExchangeRate, amount_in: f64) -> Self {
        let amount_out = rate.convert(amount_in);
        Self {
            rate,
            amount_in,
            amount_out,
        }
    }

    pub fn formatted_amount_out(&self) -> String {
        to_fixed(self.amount_out, RATE_DECIMALS)
    }
}

impl Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {}",
            self.amount_in,
            self.rate.from,
            self.formatted_amount_out(),
            self.rate.to
        )
    }
}

/// A simulated, settled swap
#[derive(Debug, Clone, PartialEq)]
pub struct SwapReceipt {
    pub quote: SwapQuote,
    pub settled_at: DateTime<Utc>,
}

/// Accepts what an amount field may hold while typing: ASCII digits with at most one dot.
/// The empty string is accepted.
pub fn is_valid_amount_input(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_digit() || c == '.') && input.matches('.').count() <= 1
}

/// Parses a submitted amount. It must be a well formed, finite number above zero.
///
/// # Errors
/// * `SwapError::InvalidAmount` for anything else
pub fn parse_amount(input: &str) -> Result<f64, SwapError> {
    if !is_valid_amount_input(input) {
        return Err(SwapError::InvalidAmount);
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .ok_or(SwapError::InvalidAmount)
}

/// Quotes swapping `amount` of `from` into `to` at current prices.
///
/// # Errors
/// * `SwapError::InvalidAmount` if `amount` is not a positive number
/// * `SwapError::InvalidToken` if either token has no valid price
pub fn quote(prices: &PriceMap, from: &str, to: &str, amount: &str) -> Result<SwapQuote, SwapError> {
    let amount_in = parse_amount(amount)?;
    let from_price = priced(prices, from)?;
    let to_price = priced(prices, to)?;
    Ok(SwapQuote::new(
        ExchangeRate::from_prices(from, to, from_price, to_price),
        amount_in,
    ))
}

fn priced(prices: &PriceMap, token: &str) -> Result<f64, SwapError> {
    prices.valid_price(token).ok_or_else(|| SwapError::InvalidToken {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::test_helpers::prices;

    #[test]
    fn test_amount_input_pattern() {
        for input in &["", "0", "12", "12.", ".5", "12.50", "."] {
            assert!(is_valid_amount_input(input), "{input} should be accepted");
        }
        for input in &["-1", "1e5", "1.2.3", "abc", "1,5", " 1", "١"] {
            assert!(!is_valid_amount_input(input), "{input} should be rejected");
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("2.5"), Ok(2.5));
        assert_eq!(parse_amount(".5"), Ok(0.5));
        assert_eq!(parse_amount("3."), Ok(3.0));
        for input in &["", ".", "0", "0.000", "-1", "abc"] {
            assert_eq!(parse_amount(input), Err(SwapError::InvalidAmount));
        }
    }

    #[test]
    fn test_exchange_rate_is_price_ratio() {
        let prices = prices(&[("ETH", 1600.0), ("USDC", 1.0), ("ZERO", 0.0)]);

        let rate = ExchangeRate::between(&prices, "ETH", "USDC").unwrap();
        assert!((rate.rate - 1600.0).abs() < f64::EPSILON);
        assert_eq!(rate.to_string(), "1 ETH = 1600.000000 USDC");

        let rate = ExchangeRate::between(&prices, "USDC", "ETH").unwrap();
        assert_eq!(rate.formatted_rate(), "0.000625");

        assert!(ExchangeRate::between(&prices, "ETH", "ZERO").is_none());
        assert!(ExchangeRate::between(&prices, "ETH", "MISSING").is_none());
    }

    #[test]
    fn test_quote() {
        let prices = prices(&[("ETH", 1600.0), ("USDC", 1.0)]);

        let quote = quote(&prices, "ETH", "USDC", "2").unwrap();
        assert_eq!(quote.formatted_amount_out(), "3200.000000");
        assert_eq!(quote.to_string(), "2 ETH -> 3200.000000 USDC");
    }

    #[test]
    fn test_quote_errors() {
        let prices = prices(&[("ETH", 1600.0), ("USDC", 1.0)]);

        assert_eq!(quote(&prices, "ETH", "USDC", "0"), Err(SwapError::InvalidAmount));
        assert_eq!(
            quote(&prices, "DOGE", "ETH", "1"),
            Err(SwapError::InvalidToken {
                token: "DOGE".to_string()
            })
        );
        assert_eq!(
            quote(&prices, "ETH", "DOGE", "1"),
            Err(SwapError::InvalidToken {
                token: "DOGE".to_string()
            })
        );
        assert_eq!(
            SwapError::MissingToken { side: Side::To }.to_string(),
            "No to token selected"
        );
    }
}
