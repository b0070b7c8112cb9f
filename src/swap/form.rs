/// State of the currency swap form, without any rendering.
///
/// The "to" amount is always derived from the "from" amount and the current rate, it is
/// never edited directly.
use std::time::Duration;

use chrono::Utc;

use super::quote::{is_valid_amount_input, parse_amount, ExchangeRate, Side, SwapError, SwapQuote, SwapReceipt};
use crate::notify::{Notification, Notifier};
use crate::prices::PriceMap;
use crate::utils::constants::RATE_DECIMALS;
use crate::utils::format::to_fixed;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapForm {
    from_token: Option<String>,
    to_token: Option<String>,
    from_amount: String,
    to_amount: String,
}

impl SwapForm {
    /// Preselects the first two priced tokens (sorted by name) when there are at least two
    pub fn with_defaults(prices: &PriceMap) -> Self {
        let mut form = Self::default();
        if let [from, to, ..] = prices.valid_tokens()[..] {
            form.from_token = Some(from.to_string());
            form.to_token = Some(to.to_string());
        }
        form
    }

    /// A form filled in one go, as from command line arguments. Unlike interactive entry,
    /// rejected input is an error rather than ignored.
    ///
    /// # Errors
    /// * `SwapError::InvalidToken` if either token has no valid price
    /// * `SwapError::MalformedAmount` if `amount` is not digits with at most one dot
    pub fn prefilled(prices: &PriceMap, from: &str, to: &str, amount: &str) -> Result<Self, SwapError> {
        let mut form = Self::with_defaults(prices);
        for (side, token) in [(Side::From, from), (Side::To, to)] {
            if !form.select_token(side, token, prices) {
                return Err(SwapError::InvalidToken {
                    token: token.to_string(),
                });
            }
        }
        if !form.set_from_amount(amount, prices) {
            return Err(SwapError::MalformedAmount {
                input: amount.to_string(),
            });
        }
        Ok(form)
    }

    pub fn from_token(&self) -> Option<&str> {
        self.from_token.as_deref()
    }

    pub fn to_token(&self) -> Option<&str> {
        self.to_token.as_deref()
    }

    pub fn from_amount(&self) -> &str {
        &self.from_amount
    }

    pub fn to_amount(&self) -> &str {
        &self.to_amount
    }

    /// Updates the entered amount. Input that is not digits with at most one dot is
    /// ignored and `false` returned.
    pub fn set_from_amount(&mut self, input: &str, prices: &PriceMap) -> bool {
        if !is_valid_amount_input(input) {
            log::debug!("swap: rejected amount input {input:?}");
            return false;
        }
        self.from_amount = input.to_string();
        self.recompute(prices);
        true
    }

    /// Tokens without a valid price cannot be selected
    pub fn select_token(&mut self, side: Side, token: &str, prices: &PriceMap) -> bool {
        if prices.valid_price(token).is_none() {
            log::debug!("swap: {token} has no valid price, selection ignored");
            return false;
        }
        let slot = match side {
            Side::From => &mut self.from_token,
            Side::To => &mut self.to_token,
        };
        *slot = Some(token.to_string());
        self.recompute(prices);
        true
    }

    pub fn select_from_token(&mut self, token: &str, prices: &PriceMap) -> bool {
        self.select_token(Side::From, token, prices)
    }

    pub fn select_to_token(&mut self, token: &str, prices: &PriceMap) -> bool {
        self.select_token(Side::To, token, prices)
    }

    pub fn exchange_rate(&self, prices: &PriceMap) -> Option<ExchangeRate> {
        ExchangeRate::between(prices, self.from_token.as_deref()?, self.to_token.as_deref()?)
    }

    /// Swaps the two sides. The previous output becomes the new input.
    pub fn flip(&mut self, prices: &PriceMap) {
        std::mem::swap(&mut self.from_token, &mut self.to_token);
        std::mem::swap(&mut self.from_amount, &mut self.to_amount);
        self.recompute(prices);
    }

    /// Checks the form can be submitted and prices the swap
    ///
    /// # Errors
    /// * `SwapError::InvalidAmount` if the amount is empty, malformed or not above zero
    /// * `SwapError::MissingToken` if a side has no token
    /// * `SwapError::RateUnavailable` if either price is missing
    pub fn validate(&self, prices: &PriceMap) -> Result<SwapQuote, SwapError> {
        let amount_in = parse_amount(&self.from_amount)?;
        let from = self
            .from_token
            .as_deref()
            .ok_or(SwapError::MissingToken { side: Side::From })?;
        let to = self
            .to_token
            .as_deref()
            .ok_or(SwapError::MissingToken { side: Side::To })?;
        let rate = ExchangeRate::between(prices, from, to).ok_or_else(|| SwapError::RateUnavailable {
            from: from.to_string(),
            to: to.to_string(),
        })?;
        Ok(SwapQuote::new(rate, amount_in))
    }

    /// Submits a simulated swap that settles after `delay`.
    ///
    /// The outcome is reported through `notifier`. On success both amounts are cleared.
    ///
    /// # Errors
    /// * Any error from [`Self::validate`], in which case the form is left untouched
    pub async fn submit(
        &mut self,
        prices: &PriceMap,
        delay: Duration,
        notifier: &Notifier,
    ) -> Result<SwapReceipt, SwapError> {
        let quote = match self.validate(prices) {
            Ok(quote) => quote,
            Err(e) => {
                let notification = match &e {
                    SwapError::InvalidAmount => Notification::error("Invalid amount"),
                    other => Notification::error("Swap failed").with_description(&other.to_string()),
                };
                notifier.notify(notification).await;
                return Err(e);
            }
        };

        log::info!("swap: submitting {quote}");
        tokio::time::sleep(delay).await;

        notifier
            .notify(Notification::success("Swap successful!").with_description(&quote.to_string()))
            .await;
        self.from_amount.clear();
        self.to_amount.clear();

        Ok(SwapReceipt {
            quote,
            settled_at: Utc::now(),
        })
    }

    fn recompute(&mut self, prices: &PriceMap) {
        let amount = self.from_amount.parse::<f64>().ok().filter(|a| a.is_finite());
        self.to_amount = match (amount, self.exchange_rate(prices)) {
            (Some(amount), Some(rate)) => to_fixed(rate.convert(amount), RATE_DECIMALS),
            _ => String::new(),
        };
    }
}
